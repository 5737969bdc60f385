//! Room allocation service client.
//!
//! Two one-shot calls made before a session exists: create a room, and check
//! that a room is still open before joining it. No retries; a failure sends
//! the user back out.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use reqwest::Url;
use serde::Deserialize;

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::machine::Seat;

/// `GET /rooms/{id}/open` answers either a bare boolean or `{"open": bool}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RoomOpenBody {
    Bare(bool),
    Wrapped { open: bool },
}

impl From<RoomOpenBody> for bool {
    fn from(body: RoomOpenBody) -> Self {
        match body {
            RoomOpenBody::Bare(open) | RoomOpenBody::Wrapped { open } => open,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchmakingClient {
    http: reqwest::Client,
    base_url: String,
}

impl MatchmakingClient {
    /// # Errors
    ///
    /// Returns [`SessionError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &SessionConfig) -> Result<Self, SessionError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeouts.request())
            .connect_timeout(config.timeouts.connect())
            .build()?;
        Ok(Self { http, base_url: config.server_url.trim_end_matches('/').to_owned() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Allocate a new room with the caller seated in it.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-2xx status, or a body without
    /// `roomId`, `playerId`, and a color.
    pub async fn create_room(&self) -> Result<Seat, SessionError> {
        let url = self.endpoint(&["newgame"])?;
        let seat: Seat = self.get_json(url).await?;
        tracing::info!(room_id = %seat.room_id, color = %seat.player_color, "room created");
        Ok(seat)
    }

    /// Whether `room_id` still accepts a player.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-2xx status, or a malformed body.
    pub async fn room_is_open(&self, room_id: &str) -> Result<bool, SessionError> {
        let url = self.endpoint(&["rooms", room_id, "open"])?;
        let body: RoomOpenBody = self.get_json(url).await?;
        let open = bool::from(body);
        tracing::debug!(%room_id, open, "room open check");
        Ok(open)
    }

    /// Check that the seat's room is open before joining.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::RoomNotOpen`] when the service says no.
    pub async fn ensure_open(&self, seat: &Seat) -> Result<(), SessionError> {
        if self.room_is_open(&seat.room_id).await? {
            Ok(())
        } else {
            Err(SessionError::RoomNotOpen(seat.room_id.clone()))
        }
    }

    /// Base URL with `segments` appended, each percent-encoded as one path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, SessionError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|error| SessionError::InvalidBaseUrl(format!("{}: {error}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|()| SessionError::InvalidBaseUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T, SessionError> {
        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "room service request failed");
            return Err(SessionError::HttpStatus { status: status.as_u16() });
        }
        Ok(response.json::<T>().await?)
    }
}
