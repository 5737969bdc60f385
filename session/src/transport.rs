//! Relay channel transports.
//!
//! A [`Transport`] carries typed protocol messages for one session. Inbound
//! frames are decoded and schema-checked here; anything that fails is logged
//! and skipped, so `recv` only ever yields messages the state machine may
//! act on. `recv` returning `None` means the channel is gone.
//!
//! [`WsTransport`] talks to the relay over a websocket. [`MemoryTransport`]
//! is an in-process pair for tests and embedders, with a [`RelayEnd`] playing
//! the server.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::error::ProtocolError;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use wire::{Envelope, Inbound, Outbound};

use crate::error::SessionError;

/// Buffered envelopes per direction on a memory pair.
const MEMORY_CHANNEL_CAPACITY: usize = 64;

#[async_trait::async_trait]
pub trait Transport: Send {
    async fn send(&mut self, message: &Outbound) -> Result<(), SessionError>;

    /// Next valid inbound message, or `None` once the channel has closed.
    async fn recv(&mut self) -> Option<Inbound>;

    /// Close the channel. Closing twice is a no-op.
    async fn close(&mut self) -> Result<(), SessionError>;
}

/// Schema-check a decoded envelope.
fn accept(envelope: &Envelope) -> Option<Inbound> {
    match Inbound::from_envelope(envelope) {
        Ok(message) => Some(message),
        Err(error) => {
            tracing::warn!(name = %envelope.name, %error, "invalid inbound message dropped");
            None
        }
    }
}

// =============================================================================
// WEBSOCKET
// =============================================================================

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub struct WsTransport {
    stream: WsStream,
    closed: bool,
}

impl WsTransport {
    /// Open a websocket to `url`, giving up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ConnectTimeout`] or [`SessionError::WebSocket`].
    pub async fn connect(url: &str, timeout: Duration) -> Result<Self, SessionError> {
        let (stream, _) = tokio::time::timeout(timeout, connect_async(url))
            .await
            .map_err(|_| SessionError::ConnectTimeout(url.to_owned()))??;
        tracing::info!(%url, "relay channel connected");
        Ok(Self { stream, closed: false })
    }
}

#[async_trait::async_trait]
impl Transport for WsTransport {
    async fn send(&mut self, message: &Outbound) -> Result<(), SessionError> {
        if self.closed {
            return Err(SessionError::ChannelClosed);
        }
        let bytes = wire::encode_binary(&message.to_envelope());
        self.stream.send(Message::Binary(bytes.into())).await?;
        Ok(())
    }

    async fn recv(&mut self) -> Option<Inbound> {
        loop {
            let frame = match self.stream.next().await {
                Some(Ok(frame)) => frame,
                Some(Err(error)) => {
                    tracing::warn!(%error, "relay channel read failed");
                    self.closed = true;
                    return None;
                }
                None => {
                    self.closed = true;
                    return None;
                }
            };
            let decoded = match frame {
                Message::Binary(bytes) => wire::decode_binary(&bytes),
                Message::Text(text) => wire::decode_text(text.as_str()),
                Message::Close(_) => {
                    self.closed = true;
                    return None;
                }
                _ => continue,
            };
            match decoded {
                Ok(envelope) => {
                    if let Some(message) = accept(&envelope) {
                        return Some(message);
                    }
                }
                Err(error) => tracing::warn!(%error, "undecodable frame dropped"),
            }
        }
    }

    async fn close(&mut self) -> Result<(), SessionError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        match self.stream.close(None).await {
            Ok(())
            | Err(
                tungstenite::Error::ConnectionClosed
                | tungstenite::Error::AlreadyClosed
                | tungstenite::Error::Protocol(ProtocolError::SendAfterClosing),
            ) => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}

// =============================================================================
// MEMORY
// =============================================================================

/// Client side of an in-process channel.
pub struct MemoryTransport {
    outbound: Option<mpsc::Sender<Envelope>>,
    inbound: mpsc::Receiver<Envelope>,
}

/// Relay side of an in-process channel.
pub struct RelayEnd {
    outbound: Option<mpsc::Sender<Envelope>>,
    inbound: mpsc::Receiver<Envelope>,
}

impl MemoryTransport {
    /// Connected client and relay ends.
    #[must_use]
    pub fn pair() -> (Self, RelayEnd) {
        let (to_relay, from_client) = mpsc::channel(MEMORY_CHANNEL_CAPACITY);
        let (to_client, from_relay) = mpsc::channel(MEMORY_CHANNEL_CAPACITY);
        (
            Self { outbound: Some(to_relay), inbound: from_relay },
            RelayEnd { outbound: Some(to_client), inbound: from_client },
        )
    }
}

#[async_trait::async_trait]
impl Transport for MemoryTransport {
    async fn send(&mut self, message: &Outbound) -> Result<(), SessionError> {
        let Some(outbound) = &self.outbound else {
            return Err(SessionError::ChannelClosed);
        };
        outbound.send(message.to_envelope()).await.map_err(|_| SessionError::ChannelClosed)
    }

    async fn recv(&mut self) -> Option<Inbound> {
        loop {
            let envelope = self.inbound.recv().await?;
            if let Some(message) = accept(&envelope) {
                return Some(message);
            }
        }
    }

    async fn close(&mut self) -> Result<(), SessionError> {
        self.outbound = None;
        self.inbound.close();
        Ok(())
    }
}

impl RelayEnd {
    /// Deliver a typed message to the client.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ChannelClosed`] once either side has closed.
    pub async fn send(&self, message: &Inbound) -> Result<(), SessionError> {
        self.send_envelope(message.to_envelope()).await
    }

    /// Deliver a raw envelope, valid or not.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ChannelClosed`] once either side has closed.
    pub async fn send_envelope(&self, envelope: Envelope) -> Result<(), SessionError> {
        let Some(outbound) = &self.outbound else {
            return Err(SessionError::ChannelClosed);
        };
        outbound.send(envelope).await.map_err(|_| SessionError::ChannelClosed)
    }

    /// Next message from the client, or `None` once the client closed.
    pub async fn recv(&mut self) -> Option<Outbound> {
        loop {
            let envelope = self.inbound.recv().await?;
            match Outbound::from_envelope(&envelope) {
                Ok(message) => return Some(message),
                Err(error) => tracing::warn!(name = %envelope.name, %error, "invalid client message dropped"),
            }
        }
    }

    /// Hang up on the client.
    pub fn disconnect(&mut self) {
        self.outbound = None;
    }
}
