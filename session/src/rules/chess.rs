//! [`RuleEngine`] backed by `shakmaty`.

#[cfg(test)]
#[path = "chess_test.rs"]
mod chess_test;

use board::{BoardSnapshot, Color, MoveRequest, Piece, PieceKind, Promotion, Square};
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, File, Move, Position, Rank, Role};

use super::{LegalTarget, Rejected, RuleEngine};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid FEN {fen:?}: {reason}")]
pub struct InvalidFen {
    pub fen: String,
    pub reason: String,
}

/// Standard chess rules over a `shakmaty::Chess` position.
#[derive(Debug, Clone, Default)]
pub struct ShakmatyEngine {
    position: Chess,
}

impl ShakmatyEngine {
    /// Engine at the standard starting position.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine at the position described by `fen`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidFen`] when the text does not parse or describes an
    /// impossible position.
    pub fn from_fen(fen: &str) -> Result<Self, InvalidFen> {
        let invalid = |reason: String| InvalidFen { fen: fen.to_owned(), reason };
        let setup = fen.parse::<Fen>().map_err(|e| invalid(e.to_string()))?;
        let position = setup.into_position::<Chess>(CastlingMode::Standard).map_err(|e| invalid(e.to_string()))?;
        Ok(Self { position })
    }

    /// Legal move matching `request`, if any.
    ///
    /// A promotion move without a requested piece promotes to a queen.
    fn find_move(&self, request: &MoveRequest) -> Option<Move> {
        let from = to_shakmaty_square(request.from);
        let to = to_shakmaty_square(request.to);
        let wanted = request.promotion.unwrap_or_default();
        self.position.legal_moves().into_iter().find(|m| {
            drag_endpoints(m) == Some((from, to))
                && m.promotion().is_none_or(|role| role == to_shakmaty_role(wanted))
        })
    }
}

impl RuleEngine for ShakmatyEngine {
    fn current_turn(&self) -> Color {
        from_shakmaty_color(self.position.turn())
    }

    fn is_in_check(&self) -> bool {
        self.position.is_check()
    }

    fn attempt_move(&mut self, request: &MoveRequest) -> Result<BoardSnapshot, Rejected> {
        let chosen = self.find_move(request).ok_or(Rejected)?;
        self.position = self.position.clone().play(&chosen).map_err(|_| Rejected)?;
        Ok(self.snapshot())
    }

    fn snapshot(&self) -> BoardSnapshot {
        let board = self.position.board();
        BoardSnapshot::from_pieces(Square::all().filter_map(|square| {
            board.piece_at(to_shakmaty_square(square)).map(|piece| (square, from_shakmaty_piece(piece)))
        }))
    }

    fn legal_destinations(&self, from: Square) -> Vec<LegalTarget> {
        let origin = to_shakmaty_square(from);
        let mut targets: Vec<LegalTarget> = Vec::new();
        for m in self.position.legal_moves() {
            let Some((move_from, move_to)) = drag_endpoints(&m) else {
                continue;
            };
            if move_from != origin {
                continue;
            }
            let Some(to) = from_shakmaty_square(move_to) else {
                continue;
            };
            // Promotions yield one move per piece; list the square once.
            if targets.iter().any(|t| t.to == to) {
                continue;
            }
            targets.push(LegalTarget { to, capture: m.is_capture() });
        }
        targets
    }
}

/// Origin and drop square of a move as a player drags it.
///
/// Castling is dragged king-to-destination (g or c file), not king-to-rook.
fn drag_endpoints(m: &Move) -> Option<(shakmaty::Square, shakmaty::Square)> {
    match m {
        Move::Normal { from, to, .. } | Move::EnPassant { from, to } => Some((*from, *to)),
        Move::Castle { king, rook } => {
            let file = if rook.file() == File::H { File::G } else { File::C };
            Some((*king, shakmaty::Square::from_coords(file, king.rank())))
        }
        Move::Put { .. } => None,
    }
}

fn to_shakmaty_square(square: Square) -> shakmaty::Square {
    shakmaty::Square::from_coords(File::new(u32::from(square.file())), Rank::new(u32::from(square.rank())))
}

fn from_shakmaty_square(square: shakmaty::Square) -> Option<Square> {
    Square::all().find(|candidate| to_shakmaty_square(*candidate) == square)
}

fn from_shakmaty_color(color: shakmaty::Color) -> Color {
    match color {
        shakmaty::Color::White => Color::White,
        shakmaty::Color::Black => Color::Black,
    }
}

fn from_shakmaty_piece(piece: shakmaty::Piece) -> Piece {
    let kind = match piece.role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    };
    Piece::new(kind, from_shakmaty_color(piece.color))
}

fn to_shakmaty_role(promotion: Promotion) -> Role {
    match promotion {
        Promotion::Knight => Role::Knight,
        Promotion::Bishop => Role::Bishop,
        Promotion::Rook => Role::Rook,
        Promotion::Queen => Role::Queen,
    }
}
