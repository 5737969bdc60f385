//! Piece kinds, promotion targets, and move requests.

#[cfg(test)]
#[path = "piece_test.rs"]
mod piece_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::square::{Color, Square};

/// One of the six chess piece kinds. Serialized as its lowercase letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    #[serde(rename = "p")]
    Pawn,
    #[serde(rename = "n")]
    Knight,
    #[serde(rename = "b")]
    Bishop,
    #[serde(rename = "r")]
    Rook,
    #[serde(rename = "q")]
    Queen,
    #[serde(rename = "k")]
    King,
}

impl PieceKind {
    /// Lowercase letter (`p n b r q k`).
    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }
}

/// The four kinds a pawn may promote to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Promotion {
    #[serde(rename = "n")]
    Knight,
    #[serde(rename = "b")]
    Bishop,
    #[serde(rename = "r")]
    Rook,
    /// Supplied automatically for drag gestures.
    #[default]
    #[serde(rename = "q")]
    Queen,
}

impl From<Promotion> for PieceKind {
    fn from(value: Promotion) -> Self {
        match value {
            Promotion::Knight => Self::Knight,
            Promotion::Bishop => Self::Bishop,
            Promotion::Rook => Self::Rook,
            Promotion::Queen => Self::Queen,
        }
    }
}

/// A piece standing on a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    #[must_use]
    pub fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    /// Board-diagram letter: uppercase for white, lowercase for black.
    #[must_use]
    pub fn symbol(self) -> char {
        let letter = self.kind.letter();
        match self.color {
            Color::White => letter.to_ascii_uppercase(),
            Color::Black => letter,
        }
    }
}

/// A request to move the piece on `from` to `to`.
///
/// Matches the `move` object of the wire protocol: `{from, to, promotion?}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<Promotion>,
}

impl MoveRequest {
    /// A plain move with no promotion piece.
    #[must_use]
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to, promotion: None }
    }

    /// A move as produced by a drag gesture: promotion fixed to queen.
    #[must_use]
    pub fn with_queen(from: Square, to: Square) -> Self {
        Self { from, to, promotion: Some(Promotion::Queen) }
    }
}

impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", PieceKind::from(promotion).letter())?;
        }
        Ok(())
    }
}
