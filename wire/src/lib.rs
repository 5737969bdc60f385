//! Wire protocol for the room relay channel.
//!
//! This crate owns the named-message model shared by the session client and
//! any relay implementation. A message on the channel is an [`Envelope`]: a
//! name plus positional JSON arguments. Typed [`Outbound`] and [`Inbound`]
//! messages convert to and from envelopes, and every inbound conversion is a
//! schema check; payloads that fail it never reach session state.
//!
//! Envelopes travel as protobuf binary frames, with a JSON text form accepted
//! for relays that speak text.

pub mod codec;
pub mod message;

pub use codec::{CodecError, Envelope, decode_binary, decode_text, encode_binary, encode_text};
pub use message::{GameOverMessage, GameStatus, Inbound, JoinMessage, MoveMessage, Outbound, SchemaError};
