//! Rule engine seam.
//!
//! The session never re-derives chess legality. Everything it knows about the
//! position comes through [`RuleEngine`]: whose turn it is, whether that side
//! is in check, the current [`BoardSnapshot`], and the verdict on a move
//! attempt. Rejection is an ordinary value.
//!
//! [`ShakmatyEngine`] is the production implementation. Tests substitute
//! their own engines without touching session or drag logic.

mod chess;

#[cfg(test)]
pub(crate) mod fake;

pub use chess::{InvalidFen, ShakmatyEngine};

use board::{BoardSnapshot, Color, MoveRequest, Square};

/// The engine refused a move attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("move rejected by the rule engine")]
pub struct Rejected;

/// A legal destination for the piece on some origin square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegalTarget {
    pub to: Square,
    pub capture: bool,
}

/// Capability the session needs from a chess rules implementation.
///
/// Implementations never perform network activity.
pub trait RuleEngine {
    /// Side to move.
    fn current_turn(&self) -> Color;

    /// Whether the side to move is in check.
    fn is_in_check(&self) -> bool;

    /// Play `request` if legal and return the resulting position.
    ///
    /// # Errors
    ///
    /// Returns [`Rejected`] and leaves the position untouched when the move
    /// is not legal.
    fn attempt_move(&mut self, request: &MoveRequest) -> Result<BoardSnapshot, Rejected>;

    /// Current position.
    fn snapshot(&self) -> BoardSnapshot;

    /// Legal destinations of the piece on `from`. Empty for an empty square
    /// or a piece of the side not to move.
    fn legal_destinations(&self, from: Square) -> Vec<LegalTarget>;

    /// Color in check, if any.
    fn in_check(&self) -> Option<Color> {
        self.is_in_check().then(|| self.current_turn())
    }
}

impl<E: RuleEngine + ?Sized> RuleEngine for Box<E> {
    fn current_turn(&self) -> Color {
        (**self).current_turn()
    }

    fn is_in_check(&self) -> bool {
        (**self).is_in_check()
    }

    fn attempt_move(&mut self, request: &MoveRequest) -> Result<BoardSnapshot, Rejected> {
        (**self).attempt_move(request)
    }

    fn snapshot(&self) -> BoardSnapshot {
        (**self).snapshot()
    }

    fn legal_destinations(&self, from: Square) -> Vec<LegalTarget> {
        (**self).legal_destinations(from)
    }
}
