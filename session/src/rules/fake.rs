//! Permissive rule engine for tests.
//!
//! Any piece of the side to move may go to any square not holding a piece of
//! its own color. Check is whatever the test says it is.

use std::collections::BTreeMap;

use board::{BoardSnapshot, Color, MoveRequest, Piece, PieceKind, Square};

use super::{LegalTarget, Rejected, RuleEngine};

#[derive(Debug, Clone)]
pub(crate) struct FreeEngine {
    pieces: BTreeMap<Square, Piece>,
    turn: Color,
    pub check: bool,
    pub attempts: Vec<MoveRequest>,
}

impl FreeEngine {
    pub(crate) fn new(turn: Color) -> Self {
        Self { pieces: BTreeMap::new(), turn, check: false, attempts: Vec::new() }
    }

    pub(crate) fn with(mut self, square: &str, kind: PieceKind, color: Color) -> Self {
        if let Ok(square) = square.parse::<Square>() {
            self.pieces.insert(square, Piece::new(kind, color));
        }
        self
    }

    /// White king e1, black king e8, white pawn e2, black pawn e7.
    pub(crate) fn kings_and_pawns() -> Self {
        Self::new(Color::White)
            .with("e1", PieceKind::King, Color::White)
            .with("e2", PieceKind::Pawn, Color::White)
            .with("e8", PieceKind::King, Color::Black)
            .with("e7", PieceKind::Pawn, Color::Black)
    }
}

impl RuleEngine for FreeEngine {
    fn current_turn(&self) -> Color {
        self.turn
    }

    fn is_in_check(&self) -> bool {
        self.check
    }

    fn attempt_move(&mut self, request: &MoveRequest) -> Result<BoardSnapshot, Rejected> {
        self.attempts.push(*request);
        let piece = self.pieces.get(&request.from).copied().ok_or(Rejected)?;
        if piece.color != self.turn || request.from == request.to {
            return Err(Rejected);
        }
        if self.pieces.get(&request.to).is_some_and(|other| other.color == piece.color) {
            return Err(Rejected);
        }
        self.pieces.remove(&request.from);
        self.pieces.insert(request.to, piece);
        self.turn = self.turn.opposite();
        Ok(self.snapshot())
    }

    fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from_pieces(self.pieces.iter().map(|(square, piece)| (*square, *piece)))
    }

    fn legal_destinations(&self, from: Square) -> Vec<LegalTarget> {
        let Some(piece) = self.pieces.get(&from) else {
            return Vec::new();
        };
        if piece.color != self.turn {
            return Vec::new();
        }
        Square::all()
            .filter(|to| *to != from)
            .filter(|to| self.pieces.get(to).is_none_or(|other| other.color != piece.color))
            .map(|to| LegalTarget { to, capture: self.pieces.contains_key(&to) })
            .collect()
    }
}
