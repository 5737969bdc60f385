//! Board primitives, geometry, and drag input for the networked chess client.
//!
//! This crate has no I/O and no async. It owns the value types shared by the
//! wire protocol and the session (squares, colors, pieces, board snapshots),
//! the mapping between squares and on-screen grid coordinates for either seat,
//! and the pointer-drag state machine that turns raw pointer input into move
//! requests. Legality is never decided here; the session crate hands requests
//! to its rule engine.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`square`] | [`square::Square`] and [`square::Color`] |
//! | [`piece`] | Piece kinds, promotion targets, and [`piece::MoveRequest`] |
//! | [`snapshot`] | Immutable 8×8 [`snapshot::BoardSnapshot`] |
//! | [`geometry`] | Square ↔ grid coordinate mapping and destination resolution |
//! | [`input`] | Pointer buttons and the [`input::DragController`] state machine |
//! | [`consts`] | Shared numeric constants (board dimension, default sizes) |

pub mod consts;
pub mod geometry;
pub mod input;
pub mod piece;
pub mod snapshot;
pub mod square;

pub use geometry::{Coord, Point};
pub use piece::{MoveRequest, Piece, PieceKind, Promotion};
pub use snapshot::BoardSnapshot;
pub use square::{Color, Square};
