//! Single-threaded session event loop.

use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use parking_lot::RwLock;
use tracing::{debug, info, instrument, warn};

use studio_ipc::{SessionCommand, SessionEvent, SessionInput, SessionSnapshot};

use crate::session::Session;

/// Drives a [`Session`] from one ordered input channel.
///
/// Each input runs to completion before the next is received, so operator
/// commands and collaborator events are applied strictly in arrival order.
pub struct SessionRunner {
    input_rx: Receiver<SessionInput>,
    event_tx: Sender<SessionEvent>,
    session: Session,
    published: Arc<RwLock<SessionSnapshot>>,
    stats_interval: Duration,
}

impl SessionRunner {
    /// Create a runner for a session.
    pub fn new(
        session: Session,
        input_rx: Receiver<SessionInput>,
        event_tx: Sender<SessionEvent>,
        stats_interval: Duration,
    ) -> Self {
        let published = Arc::new(RwLock::new(session.snapshot()));
        Self {
            input_rx,
            event_tx,
            session,
            published,
            stats_interval,
        }
    }

    /// Latest published snapshot, readable from other threads.
    pub fn published(&self) -> Arc<RwLock<SessionSnapshot>> {
        Arc::clone(&self.published)
    }

    /// Run the session (blocking).
    #[instrument(name = "session_run", skip(self))]
    pub fn run(&mut self) {
        info!("Session starting");
        self.send_event(SessionEvent::Ready);
        self.publish_snapshot();

        loop {
            match self.input_rx.recv_timeout(self.stats_interval) {
                Ok(input) => {
                    if !self.handle_input(input) {
                        break;
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    if self.session.is_live() {
                        self.send_event(SessionEvent::Stats(self.session.header_stats()));
                    }
                }
                Err(RecvTimeoutError::Disconnected) => {
                    info!("Input channel disconnected, shutting down");
                    break;
                }
            }
        }

        self.send_event(SessionEvent::Shutdown);
        info!("Session stopped");
    }

    /// Handle one input. Returns false if the session should stop.
    pub fn handle_input(&mut self, input: SessionInput) -> bool {
        match input {
            SessionInput::Command(SessionCommand::Shutdown) => return false,
            SessionInput::Command(SessionCommand::GetSnapshot) => {
                let snapshot = self.session.snapshot();
                self.send_event(SessionEvent::SnapshotChanged(Box::new(snapshot)));
                return true;
            }
            _ => {}
        }

        let action = input.name();
        match self.session.apply(input) {
            Ok(applied) => {
                if applied.changed {
                    self.publish_snapshot();
                }
                if let Some(notice) = applied.notice {
                    self.send_event(SessionEvent::Notice(notice));
                }
            }
            Err(e) => {
                if e.is_rejection() {
                    debug!(action, error = %e, "Input rejected");
                } else {
                    warn!(action, error = %e, "Input failed");
                }
                self.send_event(SessionEvent::Rejected {
                    action: action.to_string(),
                    error: e.to_string(),
                });
            }
        }

        true
    }

    fn publish_snapshot(&self) {
        let snapshot = self.session.snapshot();
        *self.published.write() = snapshot.clone();
        self.send_event(SessionEvent::SnapshotChanged(Box::new(snapshot)));
    }

    fn send_event(&self, event: SessionEvent) {
        if let Err(e) = self.event_tx.try_send(event) {
            warn!("Failed to send event: {}", e);
        }
    }
}
