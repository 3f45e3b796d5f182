//! Events flowing into and out of the session.

use serde::{Deserialize, Serialize};

use crate::commands::SessionCommand;
use crate::state::{HeaderStats, SessionSnapshot};
use crate::types::{ChatMessage, ChatSkipReason, ConnectionState, GuestId, GuestInfo};

/// Notifications from the media, network and invite collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExternalEvent {
    /// A guest asked to join through the invite link.
    JoinRequested(GuestInfo),

    /// A guest disconnected on their own.
    GuestLeft(GuestId),

    /// A guest's microphone appeared or went away.
    GuestAudioChanged { id: GuestId, has_audio: bool },

    /// The requested capture source is running.
    SourceAcquired,

    /// The media layer failed to capture or stream.
    SourceFailed { message: String },

    /// Audience size changed.
    ViewerCountChanged(u32),

    /// The broadcast went live or offline.
    LivenessChanged(bool),

    /// A viewer's chat message arrived.
    ChatReceived(ChatMessage),

    /// Media connection state changed.
    ConnectionStateChanged(ConnectionState),
}

impl ExternalEvent {
    /// Returns a short name for logs and rejection events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::JoinRequested(_) => "join_requested",
            Self::GuestLeft(_) => "guest_left",
            Self::GuestAudioChanged { .. } => "guest_audio_changed",
            Self::SourceAcquired => "source_acquired",
            Self::SourceFailed { .. } => "source_failed",
            Self::ViewerCountChanged(_) => "viewer_count_changed",
            Self::LivenessChanged(_) => "liveness_changed",
            Self::ChatReceived(_) => "chat_received",
            Self::ConnectionStateChanged(_) => "connection_state_changed",
        }
    }
}

/// One entry of the session's ordered input stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionInput {
    /// An operator action.
    Command(SessionCommand),

    /// A collaborator notification.
    External(ExternalEvent),
}

impl SessionInput {
    /// Returns a short name for logs and rejection events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Command(command) => command.name(),
            Self::External(event) => event.name(),
        }
    }
}

impl From<SessionCommand> for SessionInput {
    fn from(command: SessionCommand) -> Self {
        Self::Command(command)
    }
}

impl From<ExternalEvent> for SessionInput {
    fn from(event: ExternalEvent) -> Self {
        Self::External(event)
    }
}

/// Outcomes worth telling the operator about that are not state changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notice {
    /// A new guest is waiting for admission.
    GuestRequested { id: GuestId, name: String },

    /// Invite link was written to the clipboard.
    InviteCopied,

    /// Invite link was handed to the native share sheet.
    InviteShared,

    /// Chat message was dispatched.
    ChatSent { text: String },

    /// Chat send was skipped without touching the draft.
    ChatSkipped { reason: ChatSkipReason },
}

/// Events that the session sends to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Session is ready for input.
    Ready,

    /// State changed; carries the new read model.
    SnapshotChanged(Box<SessionSnapshot>),

    /// Informational outcome of an input.
    Notice(Notice),

    /// An input was rejected; no state changed.
    Rejected {
        /// Name of the rejected input.
        action: String,

        /// Error message.
        error: String,
    },

    /// Periodic header statistics while live.
    Stats(HeaderStats),

    /// Session has shut down.
    Shutdown,
}
