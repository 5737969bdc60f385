//! Immutable board snapshot produced by a rule engine.

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod snapshot_test;

use crate::geometry::square_to_coordinate;
use crate::piece::{Piece, PieceKind};
use crate::square::{Color, Square};

/// An 8×8 grid of optional pieces. Row 0 is rank 8, column 0 is file a.
///
/// Sessions never edit a snapshot in place; rule engines build a fresh one
/// after every accepted move.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardSnapshot {
    rows: [[Option<Piece>; 8]; 8],
}

impl BoardSnapshot {
    /// A board with no pieces.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a snapshot from `(square, piece)` pairs. Later pairs win.
    #[must_use]
    pub fn from_pieces(pieces: impl IntoIterator<Item = (Square, Piece)>) -> Self {
        let mut snapshot = Self::empty();
        for (square, piece) in pieces {
            *snapshot.cell_mut(square) = Some(piece);
        }
        snapshot
    }

    /// The piece on `square`, if any.
    #[must_use]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        let (row, col) = index(square);
        self.rows[row][col]
    }

    /// Rows in display order (rank 8 first), as seen by the white seat.
    #[must_use]
    pub fn rows(&self) -> &[[Option<Piece>; 8]; 8] {
        &self.rows
    }

    /// Every occupied square with its piece.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|square| self.piece_at(square).map(|piece| (square, piece)))
    }

    /// Square of `color`'s king, if it is on the board.
    #[must_use]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, piece)| piece.kind == PieceKind::King && piece.color == color)
            .map(|(square, _)| square)
    }

    fn cell_mut(&mut self, square: Square) -> &mut Option<Piece> {
        let (row, col) = index(square);
        &mut self.rows[row][col]
    }
}

fn index(square: Square) -> (usize, usize) {
    let coord = square_to_coordinate(square, false);
    (coord.row_index(), coord.col_index())
}
