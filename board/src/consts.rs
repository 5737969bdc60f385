//! Shared numeric constants for the board crate.

// ── Board ───────────────────────────────────────────────────────

/// Squares per side.
pub const BOARD_DIM: u8 = 8;

/// Largest valid grid index on either axis.
pub const MAX_INDEX: i32 = 7;

// ── Layout ──────────────────────────────────────────────────────

/// Default rendered board edge in CSS pixels.
pub const DEFAULT_BOARD_SIZE_PX: f64 = 800.0;

/// Default square edge in CSS pixels (board edge / 8).
pub const DEFAULT_SQUARE_SIZE_PX: f64 = DEFAULT_BOARD_SIZE_PX / 8.0;
