//! Read models published to the presentation layer.

use serde::{Deserialize, Serialize};

use crate::types::{ChatMessage, ConnectionState, DisplayMode, GuestId, GuestStatus, SourceMode};

/// A guest as seen by the views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestView {
    /// Guest identifier.
    pub id: GuestId,

    /// Display name.
    pub name: String,

    /// Admission status.
    pub status: GuestStatus,

    /// Whether the guest has a microphone.
    pub has_audio: bool,

    /// Whether the operator muted the guest.
    pub muted: bool,

    /// Whether the guest is the focused one.
    pub focused: bool,
}

impl GuestView {
    /// Returns true if the guest is waiting for admission.
    pub fn is_pending(&self) -> bool {
        self.status == GuestStatus::Pending
    }

    /// Returns true if the guest has been admitted.
    pub fn is_connected(&self) -> bool {
        self.status == GuestStatus::Connected
    }
}

/// The guest roster at one revision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSnapshot {
    /// Bumped on every roster mutation.
    pub revision: u64,

    /// Guests in join-request order.
    pub guests: Vec<GuestView>,
}

impl RosterSnapshot {
    /// Look up a guest by id.
    pub fn get(&self, id: GuestId) -> Option<&GuestView> {
        self.guests.iter().find(|guest| guest.id == id)
    }

    /// The focused guest, if any.
    pub fn focused(&self) -> Option<&GuestView> {
        self.guests.iter().find(|guest| guest.focused)
    }

    /// Guests waiting for admission.
    pub fn pending(&self) -> impl Iterator<Item = &GuestView> {
        self.guests.iter().filter(|guest| guest.is_pending())
    }

    /// Admitted guests.
    pub fn connected(&self) -> impl Iterator<Item = &GuestView> {
        self.guests.iter().filter(|guest| guest.is_connected())
    }

    /// Returns true if no guest is known.
    pub fn is_empty(&self) -> bool {
        self.guests.is_empty()
    }
}

/// Capture source and layout state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSnapshot {
    /// Active capture mode.
    pub source: SourceMode,

    /// Whether screen capture includes system audio.
    pub screen_with_audio: bool,

    /// Pane arrangement.
    pub display_mode: DisplayMode,

    /// Last diagnostic from the media layer.
    pub stream_error: Option<String>,

    /// True while a source request awaits the media layer's answer.
    pub acquiring: bool,
}

/// Chat input state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSnapshot {
    /// Unsent text.
    pub draft: String,

    /// Draft length in characters.
    pub char_count: usize,

    /// Maximum draft length in characters.
    pub max_chars: usize,

    /// Draft is close to the length limit.
    pub warning: bool,

    /// Chat input has been disabled externally.
    pub disabled: bool,

    /// A send would dispatch right now.
    pub can_send: bool,
}

/// Roster totals shown in the header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestCounts {
    /// Guests waiting for admission.
    pub pending: usize,

    /// Admitted guests.
    pub connected: usize,
}

/// Header statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderStats {
    /// Current viewer count.
    pub viewers: u32,

    /// Highest viewer count seen this session.
    pub peak_viewers: u32,

    /// Whether the broadcast is live.
    pub is_live: bool,

    /// Seconds since the broadcast went live (0 when offline).
    pub uptime_seconds: u64,

    /// Chat messages sent by the operator.
    pub messages_sent: u64,

    /// Chat messages received from viewers.
    pub messages_received: u64,

    /// Roster totals.
    pub guests: GuestCounts,
}

/// The complete read model consumed by the views.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Guest roster.
    pub roster: RosterSnapshot,

    /// Source and layout.
    pub source: SourceSnapshot,

    /// Shareable join link.
    pub invite_link: String,

    /// Chat input.
    pub chat: ChatSnapshot,

    /// Header statistics.
    pub stats: HeaderStats,

    /// Media connection state.
    pub connection: ConnectionState,

    /// Most recent received chat messages, oldest first.
    pub recent_messages: Vec<ChatMessage>,
}
