//! Mapping between squares, grid coordinates, and pixel offsets.
//!
//! Grid coordinates are screen-oriented: `x` grows to the right and `y` grows
//! downward, so for the white seat a8 is `(0, 0)` and h1 is `(7, 7)`. The black
//! seat sees the board rotated 180°, which mirrors both axes. Every function
//! here takes that orientation as `flipped` so callers share one code path for
//! both seats.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use crate::consts::MAX_INDEX;
use crate::square::Square;

/// A point or offset in board-relative CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    #[must_use]
    pub fn minus(self, other: Self) -> Self {
        Self { x: self.x - other.x, y: self.y - other.y }
    }

    /// Component-wise sum `self + other`.
    #[must_use]
    pub fn plus(self, other: Self) -> Self {
        Self { x: self.x + other.x, y: self.y + other.y }
    }
}

/// A grid coordinate. May lie off the board; see [`coordinate_to_square`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether both axes fall in `[0, 7]`.
    #[must_use]
    pub fn on_board(self) -> bool {
        (0..=MAX_INDEX).contains(&self.x) && (0..=MAX_INDEX).contains(&self.y)
    }

    pub(crate) fn row_index(self) -> usize {
        usize::try_from(self.y).unwrap_or_default()
    }

    pub(crate) fn col_index(self) -> usize {
        usize::try_from(self.x).unwrap_or_default()
    }
}

/// Grid coordinate of `square` for the given orientation.
///
/// Files map a..h to 0..7 and ranks map 8..1 to 0..7. When `flipped`, both
/// axes are mirrored (`7 - x`, `7 - y`).
#[must_use]
pub fn square_to_coordinate(square: Square, flipped: bool) -> Coord {
    let x = i32::from(square.file());
    let y = MAX_INDEX - i32::from(square.rank());
    if flipped { Coord::new(MAX_INDEX - x, MAX_INDEX - y) } else { Coord::new(x, y) }
}

/// Square at grid coordinate `(x, y)` for the given orientation.
///
/// Returns `None` when either axis is outside `[0, 7]`; a drag released off
/// the board is an ordinary outcome, not an error.
#[must_use]
pub fn coordinate_to_square(x: i32, y: i32, flipped: bool) -> Option<Square> {
    let coord = Coord::new(x, y);
    if !coord.on_board() {
        return None;
    }
    let (x, y) = if flipped { (MAX_INDEX - x, MAX_INDEX - y) } else { (x, y) };
    let (Ok(file), Ok(rank)) = (u8::try_from(x), u8::try_from(MAX_INDEX - y)) else {
        return None;
    };
    Square::new(file, rank)
}

/// Square under a board-relative pixel point, or `None` off the board.
#[must_use]
pub fn point_to_square(point: Point, square_size: f64, flipped: bool) -> Option<Square> {
    if square_size <= 0.0 {
        return None;
    }
    let x = to_cell(point.x / square_size, f64::floor)?;
    let y = to_cell(point.y / square_size, f64::floor)?;
    coordinate_to_square(x, y, flipped)
}

/// Destination reached by dragging the piece on `origin` by `delta` pixels.
///
/// Each axis moves by `round(delta / square_size)` cells, rounding halves
/// upward.
#[must_use]
pub fn resolve_destination(origin: Square, delta: Point, square_size: f64, flipped: bool) -> Option<Square> {
    if square_size <= 0.0 {
        return None;
    }
    let start = square_to_coordinate(origin, flipped);
    let dx = to_cell(delta.x / square_size, round_half_up)?;
    let dy = to_cell(delta.y / square_size, round_half_up)?;
    coordinate_to_square(start.x.saturating_add(dx), start.y.saturating_add(dy), flipped)
}

fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Convert a cell offset to `i32`, rejecting NaN and infinities.
#[allow(clippy::cast_possible_truncation)]
fn to_cell(value: f64, snap: fn(f64) -> f64) -> Option<i32> {
    let snapped = snap(value);
    if !snapped.is_finite() {
        return None;
    }
    // Saturating float-to-int cast; anything that large is off the board anyway.
    Some(snapped as i32)
}
