//! View flags derived from snapshots.
//!
//! These are pure functions so the dashboard can re-derive every affordance
//! from the latest snapshot without holding state of its own.

use studio_ipc::{ChatSnapshot, GuestView, SessionSnapshot, SourceSnapshot};

/// Mute button is shown for connected guests with a microphone.
pub fn show_mute_button(guest: &GuestView) -> bool {
    guest.is_connected() && guest.has_audio
}

/// Focus button is highlighted for the focused guest.
pub fn is_focus_active(guest: &GuestView) -> bool {
    guest.focused
}

/// Focus and remove controls are shown for connected guests.
pub fn show_guest_controls(guest: &GuestView) -> bool {
    guest.is_connected()
}

/// Admit and reject controls are shown for pending guests.
pub fn show_admission_controls(guest: &GuestView) -> bool {
    guest.is_pending()
}

/// Screen audio toggle is shown when the source captures the screen.
pub fn show_screen_audio_toggle(source: &SourceSnapshot) -> bool {
    source.source.has_screen()
}

/// Layout menu is enabled when there is a secondary pane.
pub fn layout_controls_enabled(source: &SourceSnapshot) -> bool {
    source.source.has_screen()
}

/// Chat input accepts typing when not disabled and the broadcast is live.
pub fn chat_input_enabled(snapshot: &SessionSnapshot) -> bool {
    !snapshot.chat.disabled && snapshot.stats.is_live
}

/// Send button is enabled when a send would dispatch.
pub fn send_enabled(chat: &ChatSnapshot) -> bool {
    chat.can_send
}

/// Character counter text, e.g. "152/200".
pub fn chat_counter_label(chat: &ChatSnapshot) -> String {
    format!("{}/{}", chat.char_count, chat.max_chars)
}

/// Connection banner text, or None while connected.
pub fn connection_banner(snapshot: &SessionSnapshot) -> Option<String> {
    (!snapshot.connection.is_connected()).then(|| snapshot.connection.message())
}
