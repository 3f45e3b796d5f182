//! Header statistics collection.

use std::time::Instant;

use tracing::{debug, info};

use studio_ipc::HeaderStats;

/// Collects audience and chat statistics for the dashboard header.
#[derive(Debug, Default)]
pub struct StatsCollector {
    live_since: Option<Instant>,
    viewers: u32,
    peak_viewers: u32,
    messages_sent: u64,
    messages_received: u64,
}

impl StatsCollector {
    /// Create a collector for an offline broadcast.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a liveness change. Returns true if liveness changed.
    pub fn set_live(&mut self, live: bool) -> bool {
        self.set_live_at(live, Instant::now())
    }

    fn set_live_at(&mut self, live: bool, now: Instant) -> bool {
        if live == self.is_live() {
            return false;
        }

        self.live_since = live.then_some(now);
        info!(live, "Liveness changed");
        true
    }

    /// Returns true if the broadcast is live.
    pub fn is_live(&self) -> bool {
        self.live_since.is_some()
    }

    /// Record a viewer count update. Returns true if the count changed.
    pub fn update_viewers(&mut self, viewers: u32) -> bool {
        if viewers == self.viewers {
            return false;
        }

        self.viewers = viewers;
        if viewers > self.peak_viewers {
            self.peak_viewers = viewers;
            debug!(peak = viewers, "New viewer peak");
        }
        true
    }

    /// Record a message sent by the operator.
    pub fn record_sent(&mut self) {
        self.messages_sent += 1;
    }

    /// Record a message received from a viewer.
    pub fn record_received(&mut self) {
        self.messages_received += 1;
    }

    /// Get current stats snapshot.
    pub fn snapshot(&self) -> HeaderStats {
        self.snapshot_at(Instant::now())
    }

    fn snapshot_at(&self, now: Instant) -> HeaderStats {
        let uptime_seconds = self
            .live_since
            .map(|since| now.saturating_duration_since(since).as_secs())
            .unwrap_or(0);

        HeaderStats {
            viewers: self.viewers,
            peak_viewers: self.peak_viewers,
            is_live: self.is_live(),
            uptime_seconds,
            messages_sent: self.messages_sent,
            messages_received: self.messages_received,
            ..Default::default()
        }
    }
}
