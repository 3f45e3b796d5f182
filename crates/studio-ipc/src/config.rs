//! Session configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Errors found while validating a [`SessionConfig`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Invite base URL does not parse or cannot carry a path.
    #[error("Invalid invite base URL: {0}")]
    InvalidInviteUrl(String),

    /// A roster limit of zero would reject every admission.
    #[error("max_guests must be at least 1")]
    InvalidMaxGuests,

    /// Chat history must hold at least one message.
    #[error("chat_history_limit must be at least 1")]
    InvalidHistoryLimit,

    /// Stats interval must be non-zero.
    #[error("stats_interval_ms must be at least 1")]
    InvalidStatsInterval,
}

/// Configuration for one broadcast session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Base URL that invite links are built from (e.g., "https://studio.example/join").
    pub invite_base_url: String,

    /// Maximum number of concurrently connected guests (None for unlimited).
    pub max_guests: Option<usize>,

    /// Number of received chat messages kept for the chat pane.
    pub chat_history_limit: usize,

    /// Interval between header stats updates while live, in milliseconds.
    pub stats_interval_ms: u64,

    /// Broadcast title, used for the broadcast record and share payloads.
    pub stream_title: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            invite_base_url: "http://localhost:8080/join".to_string(),
            max_guests: None,
            chat_history_limit: 100,
            stats_interval_ms: 1000,
            stream_title: "Live stream".to_string(),
        }
    }
}

impl SessionConfig {
    /// Check that the configuration can back a session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.invite_base_url)
            .map_err(|e| ConfigError::InvalidInviteUrl(format!("{}: {e}", self.invite_base_url)))?;
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidInviteUrl(self.invite_base_url.clone()));
        }

        if self.max_guests == Some(0) {
            return Err(ConfigError::InvalidMaxGuests);
        }
        if self.chat_history_limit == 0 {
            return Err(ConfigError::InvalidHistoryLimit);
        }
        if self.stats_interval_ms == 0 {
            return Err(ConfigError::InvalidStatsInterval);
        }

        Ok(())
    }
}
