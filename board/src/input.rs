//! Input model: pointer buttons and the drag-to-move state machine.
//!
//! `DragController` tracks at most one piece drag between pointer-down and
//! pointer-up. It accumulates the pointer's frame-to-frame movement plus any
//! page scroll that happens mid-drag, and on release resolves the destination
//! square through [`crate::geometry::resolve_destination`]. It never decides
//! legality: a release only produces a [`DragAction::MoveRequested`] that the
//! session submits to its rule engine.
//!
//! The host wires its window listeners to the controller: attach them when
//! [`DragAction::Started`] is returned, detach them on any transition back to
//! `Idle`.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::consts::DEFAULT_SQUARE_SIZE_PX;
use crate::geometry::{Point, resolve_destination};
use crate::piece::{MoveRequest, Piece};
use crate::square::{Color, Square};

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// Session facts that decide whether a pointer-down may start a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragGate {
    /// The board is not accepting input (opponent absent, not our turn, game over).
    pub board_disabled: bool,
    /// Color of the player operating this client.
    pub local_color: Color,
    /// Side to move according to the rule engine.
    pub turn: Color,
}

impl DragGate {
    /// Whether `piece` may be picked up under this gate.
    #[must_use]
    pub fn allows(&self, piece: Piece) -> bool {
        !self.board_disabled && piece.color == self.local_color && self.turn == self.local_color
    }
}

/// Context carried by an active drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    /// Square the piece was picked up from.
    pub origin: Square,
    /// Total translation so far, in CSS pixels.
    pub delta: Point,
    /// Pointer position at the previous pointer event.
    pub last_pointer: Point,
    /// Window scroll offset at the previous scroll event.
    pub last_scroll: Point,
}

/// Internal state for the drag state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A piece is being dragged.
    Dragging(DragState),
}

/// What the host should do after feeding the controller an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragAction {
    /// Nothing changed that the host needs to act on.
    None,
    /// A drag began on `origin`: attach move/scroll/up/blur listeners and
    /// fetch legal destinations for highlighting.
    Started { origin: Square },
    /// The piece was released over a square: submit this move.
    MoveRequested(MoveRequest),
    /// The drag ended without a move (off-board release or focus loss).
    Cancelled,
}

/// Pointer-drag state machine for a single board.
#[derive(Debug, Clone)]
pub struct DragController {
    square_size: f64,
    flipped: bool,
    state: InputState,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(DEFAULT_SQUARE_SIZE_PX, false)
    }
}

impl DragController {
    /// Create an idle controller for squares `square_size` pixels wide.
    #[must_use]
    pub fn new(square_size: f64, flipped: bool) -> Self {
        Self { square_size, flipped, state: InputState::Idle }
    }

    #[must_use]
    pub fn square_size(&self) -> f64 {
        self.square_size
    }

    #[must_use]
    pub fn flipped(&self) -> bool {
        self.flipped
    }

    /// Update the square size after a layout change. Takes effect on the next release.
    pub fn set_square_size(&mut self, square_size: f64) {
        self.square_size = square_size;
    }

    #[must_use]
    pub fn state(&self) -> InputState {
        self.state
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, InputState::Dragging(_))
    }

    /// Origin square of the active drag.
    #[must_use]
    pub fn origin(&self) -> Option<Square> {
        match self.state {
            InputState::Dragging(drag) => Some(drag.origin),
            InputState::Idle => None,
        }
    }

    /// Current pixel translation of the dragged piece.
    #[must_use]
    pub fn translation(&self) -> Option<Point> {
        match self.state {
            InputState::Dragging(drag) => Some(drag.delta),
            InputState::Idle => None,
        }
    }

    /// Square the dragged piece would land on if released now.
    #[must_use]
    pub fn hover_square(&self) -> Option<Square> {
        match self.state {
            InputState::Dragging(drag) => {
                resolve_destination(drag.origin, drag.delta, self.square_size, self.flipped)
            }
            InputState::Idle => None,
        }
    }

    /// Pointer pressed on `piece` standing on `square`.
    ///
    /// Ignored while a drag is already active, for non-primary buttons, and
    /// whenever `gate` forbids picking up the piece.
    pub fn pointer_down(
        &mut self,
        square: Square,
        piece: Piece,
        button: Button,
        pointer: Point,
        scroll: Point,
        gate: DragGate,
    ) -> DragAction {
        if self.is_dragging() || button != Button::Primary || !gate.allows(piece) {
            return DragAction::None;
        }
        self.state = InputState::Dragging(DragState {
            origin: square,
            delta: Point::default(),
            last_pointer: pointer,
            last_scroll: scroll,
        });
        DragAction::Started { origin: square }
    }

    /// Pointer moved to `pointer` (same coordinate space as pointer-down).
    pub fn pointer_move(&mut self, pointer: Point) {
        if let InputState::Dragging(drag) = &mut self.state {
            drag.delta = drag.delta.plus(pointer.minus(drag.last_pointer));
            drag.last_pointer = pointer;
        }
    }

    /// Window scrolled to offset `scroll`.
    pub fn scroll(&mut self, scroll: Point) {
        if let InputState::Dragging(drag) = &mut self.state {
            drag.delta = drag.delta.plus(scroll.minus(drag.last_scroll));
            drag.last_scroll = scroll;
        }
    }

    /// Pointer released. Always returns to `Idle`.
    pub fn pointer_up(&mut self) -> DragAction {
        let InputState::Dragging(drag) = std::mem::take(&mut self.state) else {
            return DragAction::None;
        };
        match resolve_destination(drag.origin, drag.delta, self.square_size, self.flipped) {
            Some(to) => DragAction::MoveRequested(MoveRequest::with_queen(drag.origin, to)),
            None => DragAction::Cancelled,
        }
    }

    /// Window lost focus. Aborts any active drag without requesting a move.
    pub fn blur(&mut self) -> DragAction {
        match std::mem::take(&mut self.state) {
            InputState::Dragging(_) => DragAction::Cancelled,
            InputState::Idle => DragAction::None,
        }
    }
}
