//! Interfaces of the collaborators around the session core.
//!
//! Media capture, clipboard, native share and chat delivery are host
//! capabilities. Each call returns as soon as the request is handed off;
//! completions come back later as [`studio_ipc::ExternalEvent`]s.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use studio_ipc::SourceMode;

/// Failure reported by a host capability.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// The host refused the request (e.g., clipboard permission denied).
    #[error("Denied: {0}")]
    Denied(String),

    /// The host accepted the request but it failed.
    #[error("Failed: {0}")]
    Failed(String),

    /// The backing service is gone.
    #[error("Host disconnected")]
    Disconnected,
}

/// Identifier of an authenticated operator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperatorId(pub String);

impl fmt::Display for OperatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key of a persisted broadcast record. Also names the invite link.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreamKey(pub String);

impl StreamKey {
    /// Borrow the key as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StreamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A persisted broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastRecord {
    /// Record key.
    pub stream_key: StreamKey,

    /// Owner.
    pub operator: OperatorId,

    /// Broadcast title.
    pub title: String,
}

/// Operator authentication errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Credential was not accepted.
    #[error("Invalid credential")]
    InvalidCredential,

    /// Auth service could not be reached.
    #[error("Auth service unavailable: {0}")]
    Unavailable(String),
}

/// Broadcast record store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No record with that key.
    #[error("Broadcast record not found: {0}")]
    NotFound(StreamKey),

    /// Store could not complete the request.
    #[error("Store failure: {0}")]
    Failed(String),
}

/// Verifies operator credentials.
pub trait OperatorAuth: Send {
    /// Check a credential and return the operator it belongs to.
    fn verify_operator(&mut self, credential: &str) -> Result<OperatorId, AuthError>;
}

/// Persists broadcast records.
pub trait BroadcastStore: Send {
    /// Create a record for a new broadcast.
    fn create_broadcast_record(
        &mut self,
        operator: &OperatorId,
        title: &str,
    ) -> Result<StreamKey, StoreError>;

    /// Delete a broadcast record.
    fn delete_broadcast_record(&mut self, key: &StreamKey) -> Result<(), StoreError>;

    /// List broadcasts that are currently active.
    fn list_active_broadcasts(&self) -> Vec<BroadcastRecord>;
}

/// Accepts capture requests from the session.
pub trait MediaControl: Send {
    /// Ask the media layer to switch capture source.
    fn request_source(&mut self, mode: SourceMode) -> Result<(), HostError>;

    /// Ask the media layer to include or drop screen audio.
    fn request_screen_audio(&mut self, enabled: bool) -> Result<(), HostError>;
}

/// Writes text to the operator's clipboard.
pub trait Clipboard: Send {
    /// Write text to the clipboard.
    fn write_text(&mut self, text: &str) -> Result<(), HostError>;
}

/// Content handed to a native share sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    /// Share title.
    pub title: String,

    /// Shared URL.
    pub url: String,
}

/// Result of a native share attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareResult {
    /// Share sheet completed.
    Shared,

    /// Share sheet exists but the share failed or was dismissed.
    Failed(String),

    /// Host has no native share capability.
    Unsupported,
}

/// Native share capability of the host.
pub trait ShareHost: Send {
    /// Try to share the payload natively.
    fn native_share(&mut self, payload: &SharePayload) -> ShareResult;
}

/// Delivers operator chat messages to viewers.
pub trait ChatTransport: Send {
    /// Hand a message to the chat transport.
    fn dispatch(&mut self, text: &str) -> Result<(), HostError>;
}

/// The host capabilities a session calls into.
pub struct Collaborators {
    /// Capture requests.
    pub media: Box<dyn MediaControl>,

    /// Clipboard writes.
    pub clipboard: Box<dyn Clipboard>,

    /// Native share.
    pub share: Box<dyn ShareHost>,

    /// Chat delivery.
    pub chat: Box<dyn ChatTransport>,
}
