//! A seat at the board: the session machine plus the local drag controller.
//!
//! Pointer events arrive in board-relative CSS pixels. The table resolves the
//! square and piece under a pointer-down from the current snapshot, gates the
//! drag on session state, and on release submits the resolved move to the
//! machine. While a drag is active it exposes the dragged piece's legal
//! destinations for highlighting.

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;

use board::geometry::point_to_square;
use board::input::{Button, DragAction, DragController, DragGate};
use board::{Point, Square};

use crate::error::MoveRejected;
use crate::machine::{Effect, Event, Phase, SessionMachine, SessionState, Seat};
use crate::rules::{LegalTarget, RuleEngine};

/// A highlighted destination of the dragged piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hint {
    pub to: Square,
    pub capture: bool,
    /// The dragged piece is currently over this square.
    pub hovered: bool,
}

/// Why a released piece went back to its origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SnapBack {
    #[error("piece released off the board")]
    OffBoard,
    #[error(transparent)]
    Rejected(#[from] MoveRejected),
}

pub struct Table<E> {
    machine: SessionMachine<E>,
    drag: DragController,
    targets: Vec<LegalTarget>,
}

impl<E: RuleEngine> Table<E> {
    /// Seat the local player. Black sees the board flipped.
    #[must_use]
    pub fn new(engine: E, seat: Seat, square_size: f64) -> Self {
        let flipped = seat.player_color.is_flipped_seat();
        Self {
            machine: SessionMachine::new(engine, seat),
            drag: DragController::new(square_size, flipped),
            targets: Vec::new(),
        }
    }

    #[must_use]
    pub fn machine(&self) -> &SessionMachine<E> {
        &self.machine
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        self.machine.state()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.machine.phase()
    }

    #[must_use]
    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    #[must_use]
    pub fn flipped(&self) -> bool {
        self.drag.flipped()
    }

    pub fn set_square_size(&mut self, square_size: f64) {
        self.drag.set_square_size(square_size);
    }

    /// Feed a lifecycle or protocol event to the machine.
    ///
    /// A drag in progress is dropped if the board becomes disabled.
    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        let effects = self.machine.handle(event);
        if self.machine.state().board_disabled && self.drag.is_dragging() {
            tracing::debug!("board disabled mid-drag; drag dropped");
            self.blur();
        }
        effects
    }

    /// Play a move directly, bypassing the drag controller.
    ///
    /// # Errors
    ///
    /// See [`SessionMachine::submit_local_move`].
    pub fn submit_move(&mut self, request: board::MoveRequest) -> Result<Vec<Effect>, MoveRejected> {
        self.machine.submit_local_move(request)
    }

    /// Pointer pressed at `point` with the window scrolled to `scroll`.
    pub fn pointer_down(&mut self, point: Point, button: Button, scroll: Point) -> DragAction {
        let Some(square) = point_to_square(point, self.drag.square_size(), self.drag.flipped()) else {
            return DragAction::None;
        };
        let Some(piece) = self.state().board.piece_at(square) else {
            return DragAction::None;
        };
        let gate = DragGate {
            board_disabled: self.state().board_disabled,
            local_color: self.machine.local_color(),
            turn: self.machine.engine().current_turn(),
        };
        let action = self.drag.pointer_down(square, piece, button, point, scroll, gate);
        if let DragAction::Started { origin } = action {
            self.targets = self.machine.engine().legal_destinations(origin);
            tracing::debug!(%origin, targets = self.targets.len(), "drag started");
        }
        action
    }

    pub fn pointer_move(&mut self, point: Point) {
        self.drag.pointer_move(point);
    }

    pub fn scroll(&mut self, scroll: Point) {
        self.drag.scroll(scroll);
    }

    /// Pointer released. Submits the move under the piece, if any.
    ///
    /// Returns no effects when no drag was active.
    ///
    /// # Errors
    ///
    /// Returns [`SnapBack`] when the piece goes back to its origin.
    pub fn pointer_up(&mut self) -> Result<Vec<Effect>, SnapBack> {
        self.targets.clear();
        match self.drag.pointer_up() {
            DragAction::MoveRequested(request) => match self.machine.submit_local_move(request) {
                Ok(effects) => Ok(effects),
                Err(reason) => {
                    tracing::debug!(%request, %reason, "move snapped back");
                    Err(SnapBack::Rejected(reason))
                }
            },
            DragAction::Cancelled => Err(SnapBack::OffBoard),
            DragAction::None | DragAction::Started { .. } => Ok(Vec::new()),
        }
    }

    /// Window lost focus.
    pub fn blur(&mut self) -> DragAction {
        self.targets.clear();
        self.drag.blur()
    }

    /// Legal destinations of the dragged piece. Empty when idle.
    #[must_use]
    pub fn hints(&self) -> Vec<Hint> {
        let hover = self.drag.hover_square();
        self.targets
            .iter()
            .map(|target| Hint { to: target.to, capture: target.capture, hovered: hover == Some(target.to) })
            .collect()
    }
}
