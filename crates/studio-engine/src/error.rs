//! Error types for session operations.

use thiserror::Error;

use studio_ipc::GuestId;

/// Reasons an operation is forbidden in the current state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidOperation {
    /// Only pending guests can be admitted.
    #[error("{0} is not pending")]
    NotPending(GuestId),

    /// Focus and mute need an admitted guest.
    #[error("{0} is not connected")]
    NotConnected(GuestId),

    /// Guest has no microphone to mute.
    #[error("{0} has no audio")]
    NoAudio(GuestId),

    /// Camera-only capture has no secondary pane to arrange.
    #[error("camera-only source has no secondary pane")]
    NoSecondaryPane,

    /// Connected guest limit reached.
    #[error("roster is full ({max} guests)")]
    RosterFull { max: usize },
}

/// Errors that can occur during session operations.
///
/// A failed operation never leaves partial state behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Referenced guest no longer exists.
    #[error("Guest not found: {0}")]
    NotFound(GuestId),

    /// Operation not allowed in the current state.
    #[error("Invalid operation: {0}")]
    InvalidOperation(#[from] InvalidOperation),

    /// Host lacks a requested capability.
    #[error("Capability unavailable: {0}")]
    CapabilityUnavailable(String),

    /// A collaborator reported a failure.
    #[error("External failure: {0}")]
    ExternalFailure(String),
}

impl SessionError {
    /// Returns true for rejections caused by the current state rather than a collaborator.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::InvalidOperation(_))
    }
}
