//! Error types for the session crate.
//!
//! `SessionError` covers everything that can end or prevent a session:
//! configuration, the two matchmaking calls, and the channel. `MoveRejected`
//! is not a failure of the program; it is the ordinary answer to a move that
//! may not be played, and callers snap the piece back.

/// Failure to set up, run, or talk to a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("invalid config: {0}")]
    Config(String),
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("room allocation service returned HTTP {status}")]
    HttpStatus { status: u16 },
    #[error("room {0} is not open")]
    RoomNotOpen(String),
    #[error("websocket failed: {0}")]
    WebSocket(Box<tokio_tungstenite::tungstenite::Error>),
    #[error("timed out connecting to {0}")]
    ConnectTimeout(String),
    #[error("channel closed")]
    ChannelClosed,
}

impl From<tokio_tungstenite::tungstenite::Error> for SessionError {
    fn from(value: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::WebSocket(Box::new(value))
    }
}

/// Why a local move was not played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveRejected {
    #[error("the board is disabled")]
    BoardDisabled,
    #[error("it is not your turn")]
    NotYourTurn,
    #[error("the game is over")]
    GameOver,
    #[error("illegal move")]
    Illegal,
}
