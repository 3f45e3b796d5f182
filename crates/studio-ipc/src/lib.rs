//! Typed dashboard<->session messages for the studio.
//!
//! This crate defines the commands, collaborator events, session events and
//! read models exchanged between the dashboard views and the session core.

mod commands;
mod config;
mod events;
mod state;
mod types;

pub use commands::SessionCommand;
pub use config::{ConfigError, SessionConfig};
pub use events::{ExternalEvent, Notice, SessionEvent, SessionInput};
pub use state::{
    ChatSnapshot, GuestCounts, GuestView, HeaderStats, RosterSnapshot, SessionSnapshot, SourceSnapshot,
};
pub use types::{
    ChatMessage, ChatSkipReason, ConnectionState, DisplayMode, GuestId, GuestInfo, GuestStatus,
    SourceMode,
};

use crossbeam_channel::{Receiver, Sender};

/// Channel capacity for inputs (dashboard and collaborators → session).
pub const INPUT_CHANNEL_CAPACITY: usize = 64;

/// Channel capacity for events (session → dashboard).
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Creates a bounded input channel.
///
/// Commands and collaborator events share this one channel so the session
/// sees them in arrival order.
pub fn input_channel() -> (Sender<SessionInput>, Receiver<SessionInput>) {
    crossbeam_channel::bounded(INPUT_CHANNEL_CAPACITY)
}

/// Creates a bounded event channel.
pub fn event_channel() -> (Sender<SessionEvent>, Receiver<SessionEvent>) {
    crossbeam_channel::bounded(EVENT_CHANNEL_CAPACITY)
}
