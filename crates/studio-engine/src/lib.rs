//! Session orchestration core for the studio dashboard.
//!
//! This crate owns the guest roster, source and layout state, chat input and
//! invite link of one broadcast, and keeps them consistent as operator
//! commands and collaborator events arrive.

pub mod chat;
mod error;
pub mod guests;
pub mod host;
pub mod invite;
mod runner;
mod session;
pub mod source;
mod stats;
pub mod view;

#[cfg(test)]
mod fakes;

pub use chat::{ChatChannel, DraftEdit, SendOutcome, DRAFT_WARNING_CHARS, MAX_DRAFT_CHARS};
pub use error::{InvalidOperation, SessionError};
pub use guests::GuestRegistry;
pub use host::Collaborators;
pub use invite::{InviteIssuer, InviteLink, ShareOutcome};
pub use runner::SessionRunner;
pub use session::{Applied, Session};
pub use source::SourceController;
pub use stats::StatsCollector;

use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};

use studio_ipc::{ConfigError, SessionConfig, SessionEvent, SessionInput};

use crate::host::StreamKey;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Create a session runner with IPC channels.
pub fn create_runner(
    config: &SessionConfig,
    key: &StreamKey,
    host: Collaborators,
    input_rx: Receiver<SessionInput>,
    event_tx: Sender<SessionEvent>,
) -> Result<SessionRunner, ConfigError> {
    let session = Session::new(config, key, host)?;
    Ok(SessionRunner::new(
        session,
        input_rx,
        event_tx,
        Duration::from_millis(config.stats_interval_ms),
    ))
}
