//! Typed protocol messages and their schema validation.
//!
//! | Direction | Name | Arguments |
//! |-----------|------|-----------|
//! | out | `joinRoom` | `{roomId, playerId, playerColor}` |
//! | out | `move` | `{roomId, playerId, move}` |
//! | in | `roomJoined` | `{roomId, playerId, playerColor}` |
//! | in | `bothPlayersReady` | none |
//! | in | `moveMade` | `move`, `moveColor` |
//! | in | `gameOver` | `{gameStatus}` |
//! | in | `error` | `message` |
//! | in | `disconnect` | none |

#[cfg(test)]
#[path = "message_test.rs"]
mod message_test;

use std::fmt;

use board::{Color, MoveRequest};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codec::Envelope;

pub const JOIN_ROOM: &str = "joinRoom";
pub const MOVE: &str = "move";
pub const ROOM_JOINED: &str = "roomJoined";
pub const BOTH_PLAYERS_READY: &str = "bothPlayersReady";
pub const MOVE_MADE: &str = "moveMade";
pub const GAME_OVER: &str = "gameOver";
pub const ERROR: &str = "error";
pub const DISCONNECT: &str = "disconnect";

/// Why an envelope was rejected as a protocol message.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("unknown message name: {0}")]
    UnknownMessage(String),
    #[error("{name}: missing argument {index}")]
    MissingArgument { name: &'static str, index: usize },
    #[error("{name}: invalid payload: {source}")]
    Payload {
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("{name}: field `{field}` must not be empty")]
    EmptyField { name: &'static str, field: &'static str },
}

/// Join request and its acknowledgement share this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinMessage {
    pub room_id: String,
    pub player_id: String,
    pub player_color: Color,
}

/// An accepted local move, addressed to a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveMessage {
    pub room_id: String,
    pub player_id: String,
    #[serde(rename = "move")]
    pub mv: MoveRequest,
}

/// Final outcome of a game: a winning color or a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum GameStatus {
    Winner(Color),
    Draw,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Winner(color) => write!(f, "{color} wins"),
            Self::Draw => f.write_str("draw"),
        }
    }
}

impl TryFrom<String> for GameStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "w" => Ok(Self::Winner(Color::White)),
            "b" => Ok(Self::Winner(Color::Black)),
            "draw" => Ok(Self::Draw),
            _ => Err(format!("invalid game status: {value:?}")),
        }
    }
}

impl From<GameStatus> for String {
    fn from(value: GameStatus) -> Self {
        match value {
            GameStatus::Winner(color) => color.as_wire().to_owned(),
            GameStatus::Draw => "draw".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameOverMessage {
    pub game_status: GameStatus,
}

/// Messages this client sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    JoinRoom(JoinMessage),
    Move(MoveMessage),
}

impl Outbound {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::JoinRoom(_) => JOIN_ROOM,
            Self::Move(_) => MOVE,
        }
    }

    /// Wrap the message in an envelope.
    #[must_use]
    pub fn to_envelope(&self) -> Envelope {
        let payload = match self {
            Self::JoinRoom(join) => to_value(join),
            Self::Move(mv) => to_value(mv),
        };
        Envelope::new(self.name(), vec![payload])
    }

    /// Parse an envelope as a client-to-relay message (used by relays and tests).
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] for unknown names and malformed payloads.
    pub fn from_envelope(envelope: &Envelope) -> Result<Self, SchemaError> {
        match envelope.name.as_str() {
            JOIN_ROOM => parse_join(JOIN_ROOM, envelope).map(Self::JoinRoom),
            MOVE => {
                let msg: MoveMessage = parse_arg(MOVE, envelope, 0)?;
                require_non_empty(MOVE, "roomId", &msg.room_id)?;
                require_non_empty(MOVE, "playerId", &msg.player_id)?;
                Ok(Self::Move(msg))
            }
            other => Err(SchemaError::UnknownMessage(other.to_owned())),
        }
    }
}

/// Messages the relay sends to this client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    RoomJoined(JoinMessage),
    BothPlayersReady,
    MoveMade { mv: MoveRequest, color: Color },
    GameOver(GameOverMessage),
    Error(String),
    Disconnect,
}

impl Inbound {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::RoomJoined(_) => ROOM_JOINED,
            Self::BothPlayersReady => BOTH_PLAYERS_READY,
            Self::MoveMade { .. } => MOVE_MADE,
            Self::GameOver(_) => GAME_OVER,
            Self::Error(_) => ERROR,
            Self::Disconnect => DISCONNECT,
        }
    }

    /// Validate an envelope against the inbound schema.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] when the name is unknown, an argument is
    /// missing, or a payload does not match its shape.
    pub fn from_envelope(envelope: &Envelope) -> Result<Self, SchemaError> {
        match envelope.name.as_str() {
            ROOM_JOINED => parse_join(ROOM_JOINED, envelope).map(Self::RoomJoined),
            BOTH_PLAYERS_READY => Ok(Self::BothPlayersReady),
            MOVE_MADE => {
                let mv = parse_arg(MOVE_MADE, envelope, 0)?;
                let color = parse_arg(MOVE_MADE, envelope, 1)?;
                Ok(Self::MoveMade { mv, color })
            }
            GAME_OVER => parse_arg(GAME_OVER, envelope, 0).map(Self::GameOver),
            ERROR => parse_arg(ERROR, envelope, 0).map(Self::Error),
            DISCONNECT => Ok(Self::Disconnect),
            other => Err(SchemaError::UnknownMessage(other.to_owned())),
        }
    }

    /// Wrap the message in an envelope (used by relays and tests).
    #[must_use]
    pub fn to_envelope(&self) -> Envelope {
        let args = match self {
            Self::RoomJoined(join) => vec![to_value(join)],
            Self::BothPlayersReady | Self::Disconnect => Vec::new(),
            Self::MoveMade { mv, color } => vec![to_value(mv), to_value(color)],
            Self::GameOver(over) => vec![to_value(over)],
            Self::Error(message) => vec![Value::String(message.clone())],
        };
        Envelope::new(self.name(), args)
    }
}

fn parse_join(name: &'static str, envelope: &Envelope) -> Result<JoinMessage, SchemaError> {
    let join: JoinMessage = parse_arg(name, envelope, 0)?;
    require_non_empty(name, "roomId", &join.room_id)?;
    require_non_empty(name, "playerId", &join.player_id)?;
    Ok(join)
}

fn parse_arg<T: DeserializeOwned>(name: &'static str, envelope: &Envelope, index: usize) -> Result<T, SchemaError> {
    let value = envelope.args.get(index).ok_or(SchemaError::MissingArgument { name, index })?;
    T::deserialize(value).map_err(|source| SchemaError::Payload { name, source })
}

fn require_non_empty(name: &'static str, field: &'static str, value: &str) -> Result<(), SchemaError> {
    if value.is_empty() {
        return Err(SchemaError::EmptyField { name, field });
    }
    Ok(())
}

fn to_value<T: Serialize>(value: &T) -> Value {
    // Our message types serialize to plain JSON objects and strings.
    serde_json::to_value(value).unwrap_or(Value::Null)
}
