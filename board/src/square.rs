//! Square identifiers and side colors.
//!
//! Both types are small `Copy` values. On the wire a square is its two-character
//! name (`"e2"`) and a color is `"w"` or `"b"`.

#[cfg(test)]
#[path = "square_test.rs"]
mod square_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::BOARD_DIM;

const FILE_NAMES: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];

/// Error returned when parsing a [`Square`] from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid square: {0:?}")]
pub struct ParseSquareError(pub String);

/// Error returned when parsing a [`Color`] from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color: {0:?}")]
pub struct ParseColorError(pub String);

/// One of the 64 board squares.
///
/// `file` is 0..=7 for a..h and `rank` is 0..=7 for 1..8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Build a square from zero-based file and rank indices.
    #[must_use]
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        (file < BOARD_DIM && rank < BOARD_DIM).then_some(Self { file, rank })
    }

    /// Zero-based file index (a = 0).
    #[must_use]
    pub fn file(self) -> u8 {
        self.file
    }

    /// Zero-based rank index (rank 1 = 0).
    #[must_use]
    pub fn rank(self) -> u8 {
        self.rank
    }

    /// File letter, `'a'..='h'`.
    #[must_use]
    pub fn file_char(self) -> char {
        FILE_NAMES[usize::from(self.file)]
    }

    /// Rank digit, `'1'..='8'`.
    #[must_use]
    pub fn rank_char(self) -> char {
        char::from(b'1' + self.rank)
    }

    /// All 64 squares, a1 first, rank by rank.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..BOARD_DIM).flat_map(|rank| (0..BOARD_DIM).map(move |file| Self { file, rank }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        let [file, rank] = bytes else {
            return Err(ParseSquareError(s.to_owned()));
        };
        if !(b'a'..=b'h').contains(file) || !(b'1'..=b'8').contains(rank) {
            return Err(ParseSquareError(s.to_owned()));
        }
        Ok(Self { file: file - b'a', rank: rank - b'1' })
    }
}

impl TryFrom<String> for Square {
    type Error = ParseSquareError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Square> for String {
    fn from(value: Square) -> Self {
        value.to_string()
    }
}

/// Side color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "w")]
    White,
    #[serde(rename = "b")]
    Black,
}

impl Color {
    /// The other side.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Wire letter, `"w"` or `"b"`.
    #[must_use]
    pub fn as_wire(self) -> &'static str {
        match self {
            Self::White => "w",
            Self::Black => "b",
        }
    }

    /// Whether a player seated as this color sees the board rotated 180°.
    #[must_use]
    pub fn is_flipped_seat(self) -> bool {
        self == Self::Black
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::White => "white",
            Self::Black => "black",
        })
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "w" | "white" => Ok(Self::White),
            "b" | "black" => Ok(Self::Black),
            other => Err(ParseColorError(other.to_owned())),
        }
    }
}
