//! Session configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use crate::error::SessionError;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:4000";
pub const DEFAULT_BOARD_SIZE_PX: f64 = board::consts::DEFAULT_BOARD_SIZE_PX;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Path of the relay channel endpoint, appended to the server URL.
pub const WS_PATH: &str = "/ws";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub connect_secs: u64,
    pub request_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS, request_secs: DEFAULT_REQUEST_TIMEOUT_SECS }
    }
}

impl Timeouts {
    #[must_use]
    pub fn connect(&self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }

    #[must_use]
    pub fn request(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Base HTTP URL of the room service and relay, without trailing slash.
    pub server_url: String,
    /// Rendered board edge in CSS pixels.
    pub board_size_px: f64,
    pub timeouts: Timeouts,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_owned(),
            board_size_px: DEFAULT_BOARD_SIZE_PX,
            timeouts: Timeouts::default(),
        }
    }
}

impl SessionConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `ROOKERY_SERVER_URL`: default `http://localhost:4000`
    /// - `ROOKERY_BOARD_SIZE_PX`: default 800
    /// - `ROOKERY_CONNECT_TIMEOUT_SECS`: default 10
    /// - `ROOKERY_REQUEST_TIMEOUT_SECS`: default 15
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Config`] or [`SessionError::InvalidBaseUrl`]
    /// when a value is present but unusable.
    pub fn from_env() -> Result<Self, SessionError> {
        let server_url = std::env::var("ROOKERY_SERVER_URL").unwrap_or_else(|_| DEFAULT_SERVER_URL.to_owned());
        let board_size_px = match std::env::var("ROOKERY_BOARD_SIZE_PX") {
            Ok(raw) => raw
                .parse::<f64>()
                .map_err(|_| SessionError::Config(format!("ROOKERY_BOARD_SIZE_PX is not a number: {raw}")))?,
            Err(_) => DEFAULT_BOARD_SIZE_PX,
        };
        let timeouts = Timeouts {
            connect_secs: env_parse_u64("ROOKERY_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
            request_secs: env_parse_u64("ROOKERY_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        Self { server_url, board_size_px, timeouts }.validated()
    }

    /// Normalize the server URL and check value ranges.
    ///
    /// # Errors
    ///
    /// Fails for a non-http(s) URL or a board size that is not positive.
    pub fn validated(mut self) -> Result<Self, SessionError> {
        self.server_url = self.server_url.trim_end_matches('/').to_owned();
        if !self.server_url.starts_with("http://") && !self.server_url.starts_with("https://") {
            return Err(SessionError::InvalidBaseUrl(self.server_url));
        }
        if !self.board_size_px.is_finite() || self.board_size_px <= 0.0 {
            return Err(SessionError::Config(format!("board size must be positive, got {}", self.board_size_px)));
        }
        Ok(self)
    }

    /// Edge of one square in CSS pixels.
    #[must_use]
    pub fn square_size(&self) -> f64 {
        self.board_size_px / f64::from(board::consts::BOARD_DIM)
    }

    /// Relay channel URL derived from the HTTP server URL.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidBaseUrl`] for a non-http(s) URL.
    pub fn ws_url(&self) -> Result<String, SessionError> {
        let base = self.server_url.trim_end_matches('/');
        if let Some(rest) = base.strip_prefix("http://") {
            return Ok(format!("ws://{rest}{WS_PATH}"));
        }
        if let Some(rest) = base.strip_prefix("https://") {
            return Ok(format!("wss://{rest}{WS_PATH}"));
        }
        Err(SessionError::InvalidBaseUrl(self.server_url.clone()))
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .map(|v| v.parse::<u64>().unwrap_or(default))
        .unwrap_or(default)
}
