//! Client side of a networked two-player chess session.
//!
//! | Module      | Role                                                    |
//! |-------------|---------------------------------------------------------|
//! | `rules`     | rule engine seam and the `shakmaty` implementation      |
//! | `machine`   | authoritative session state and its transitions         |
//! | `table`     | machine plus local drag input                           |
//! | `transport` | relay channel over websocket or in memory               |
//! | `api`       | room allocation service calls                           |
//! | `runner`    | async loop tying a table to a transport                 |
//! | `config`    | environment configuration                               |
//!
//! A typical client allocates or checks a room with [`MatchmakingClient`],
//! connects a [`WsTransport`], seats the player at a [`Table`], and hands
//! both to [`spawn_session`]. The returned handle accepts [`UiCommand`]s and
//! publishes [`SessionView`]s until the session exits.

pub mod api;
pub mod config;
pub mod error;
pub mod machine;
pub mod rules;
pub mod runner;
pub mod table;
pub mod transport;

pub use api::MatchmakingClient;
pub use config::SessionConfig;
pub use error::{MoveRejected, SessionError};
pub use machine::{Effect, Event, Phase, Seat, SessionExit, SessionMachine, SessionState};
pub use rules::{LegalTarget, Rejected, RuleEngine, ShakmatyEngine};
pub use runner::{SessionHandle, SessionView, UiCommand, run_session, spawn_session};
pub use table::{Hint, SnapBack, Table};
pub use transport::{MemoryTransport, RelayEnd, Transport, WsTransport};
pub use wire::GameStatus;
