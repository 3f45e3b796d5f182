//! Common types used across session messages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque guest identifier, unique for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuestId(pub u64);

impl fmt::Display for GuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "guest-{}", self.0)
    }
}

/// Details a guest announces when requesting to join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestInfo {
    /// Display name.
    pub name: String,

    /// Whether the guest joins with a microphone.
    pub has_audio: bool,
}

impl GuestInfo {
    /// Create guest details.
    pub fn new(name: impl Into<String>, has_audio: bool) -> Self {
        Self {
            name: name.into(),
            has_audio,
        }
    }
}

/// Admission status of a guest. Removal deletes the guest instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuestStatus {
    /// Waiting for the operator to admit or reject.
    Pending,

    /// Admitted into the broadcast.
    Connected,
}

/// Capture devices feeding the broadcast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceMode {
    /// Camera only.
    #[default]
    Camera,

    /// Screen only.
    Screen,

    /// Camera and screen together.
    Both,
}

impl SourceMode {
    /// Returns true if this mode captures the screen.
    ///
    /// Only screen-capable modes have a secondary pane to arrange and a
    /// screen audio track to toggle.
    pub fn has_screen(self) -> bool {
        matches!(self, Self::Screen | Self::Both)
    }

    /// Returns the display name for this mode.
    pub fn name(self) -> &'static str {
        match self {
            Self::Camera => "Camera",
            Self::Screen => "Screen",
            Self::Both => "Camera + Screen",
        }
    }
}

/// Arrangement of the primary and secondary video panes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayMode {
    /// Side by side.
    #[default]
    Default,

    /// Camera enlarged, screen in a corner.
    VideoLarge,

    /// Screen enlarged, camera in a corner.
    ScreenLarge,
}

impl DisplayMode {
    /// All display modes, in menu order.
    pub const ALL: [DisplayMode; 3] = [Self::Default, Self::VideoLarge, Self::ScreenLarge];

    /// Returns the display name for this mode.
    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::VideoLarge => "Large video",
            Self::ScreenLarge => "Large screen",
        }
    }
}

/// A chat message that has already been sent by someone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Sender display name, assigned by the chat transport.
    pub sender: String,

    /// Message body.
    pub text: String,

    /// Unix timestamp in milliseconds, assigned by the chat transport.
    pub timestamp_ms: u64,
}

/// Why a chat send was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatSkipReason {
    /// Draft is empty or whitespace only.
    EmptyDraft,

    /// Chat input is disabled.
    Disabled,

    /// The broadcast is not live.
    NotLive,
}

impl ChatSkipReason {
    /// Returns a display message for this reason.
    pub fn message(self) -> &'static str {
        match self {
            Self::EmptyDraft => "Message is empty",
            Self::Disabled => "Chat is disabled",
            Self::NotLive => "Stream is not live",
        }
    }
}

/// Media connection state as reported by the media layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionState {
    /// Not connected.
    #[default]
    Disconnected,

    /// Connecting to the ingest server.
    Connecting,

    /// Connected and streaming.
    Connected,

    /// Attempting to reconnect.
    Reconnecting { attempt: u32 },

    /// Connection failed permanently.
    Failed { reason: String },
}

impl ConnectionState {
    /// Check if connected.
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }

    /// Get status message for UI.
    pub fn message(&self) -> String {
        match self {
            Self::Disconnected => "Disconnected".to_string(),
            Self::Connecting => "Connecting...".to_string(),
            Self::Connected => "Connected".to_string(),
            Self::Reconnecting { attempt } => format!("Reconnecting (attempt {attempt})"),
            Self::Failed { reason } => format!("Failed: {reason}"),
        }
    }
}
