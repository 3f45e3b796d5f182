//! Commands sent from the operator's dashboard to the session.

use serde::{Deserialize, Serialize};

use crate::types::{DisplayMode, GuestId, SourceMode};

/// Commands that the dashboard can send to the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionCommand {
    /// Admit a pending guest.
    Admit(GuestId),

    /// Reject a guest's join request.
    Reject(GuestId),

    /// Remove a guest from the broadcast.
    Remove(GuestId),

    /// Focus a connected guest, or clear focus if already focused.
    ToggleFocus(GuestId),

    /// Mute or unmute a connected guest.
    SetGuestMuted { id: GuestId, muted: bool },

    /// Select the capture source.
    SetSource(SourceMode),

    /// Flip screen audio capture.
    ToggleScreenAudio,

    /// Rearrange the video panes.
    SetDisplayMode(DisplayMode),

    /// Dismiss the current stream error.
    ClearStreamError,

    /// Replace the chat draft.
    EditDraft(String),

    /// Send the chat draft.
    SendChat,

    /// Disable or enable chat input.
    SetChatDisabled(bool),

    /// Copy the invite link to the clipboard.
    CopyInvite,

    /// Share the invite link, falling back to the clipboard.
    ShareInvite,

    /// Request the current session snapshot.
    GetSnapshot,

    /// Shut the session down.
    Shutdown,
}

impl SessionCommand {
    /// Returns a short name for logs and rejection events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Admit(_) => "admit",
            Self::Reject(_) => "reject",
            Self::Remove(_) => "remove",
            Self::ToggleFocus(_) => "toggle_focus",
            Self::SetGuestMuted { .. } => "set_guest_muted",
            Self::SetSource(_) => "set_source",
            Self::ToggleScreenAudio => "toggle_screen_audio",
            Self::SetDisplayMode(_) => "set_display_mode",
            Self::ClearStreamError => "clear_stream_error",
            Self::EditDraft(_) => "edit_draft",
            Self::SendChat => "send_chat",
            Self::SetChatDisabled(_) => "set_chat_disabled",
            Self::CopyInvite => "copy_invite",
            Self::ShareInvite => "share_invite",
            Self::GetSnapshot => "get_snapshot",
            Self::Shutdown => "shutdown",
        }
    }
}
