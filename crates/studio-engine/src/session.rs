//! Session facade composing roster, source, chat and invite state.

use std::collections::VecDeque;

use tracing::{debug, info, instrument, warn};

use studio_ipc::{
    ChatMessage, ConfigError, ConnectionState, DisplayMode, ExternalEvent, GuestId, GuestInfo,
    HeaderStats, Notice, SessionCommand, SessionConfig, SessionInput, SessionSnapshot, SourceMode,
};

use crate::chat::{ChatChannel, SendOutcome};
use crate::guests::GuestRegistry;
use crate::host::{Collaborators, StreamKey};
use crate::invite::{InviteIssuer, InviteLink, ShareOutcome};
use crate::source::SourceController;
use crate::stats::StatsCollector;
use crate::SessionResult;

/// Received messages preallocated for the history; it grows up to the limit.
const INITIAL_HISTORY_CAPACITY: usize = 64;

/// What an accepted input did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Applied {
    /// The read model changed.
    pub changed: bool,

    /// Something to tell the operator.
    pub notice: Option<Notice>,
}

impl Applied {
    fn changed() -> Self {
        Self {
            changed: true,
            notice: None,
        }
    }

    fn unchanged() -> Self {
        Self::default()
    }

    fn from_change(changed: bool) -> Self {
        Self {
            changed,
            notice: None,
        }
    }

    fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }
}

/// The single source of truth behind the dashboard.
///
/// Owns every sub-state exclusively. Rules live in the sub-components; the
/// session only routes inputs to them and calls collaborators.
pub struct Session {
    guests: GuestRegistry,
    source: SourceController,
    chat: ChatChannel,
    stats: StatsCollector,
    invite: InviteLink,
    stream_title: String,
    connection: ConnectionState,
    history: VecDeque<ChatMessage>,
    history_limit: usize,
    host: Collaborators,
}

impl Session {
    /// Create a session for the broadcast identified by `key`.
    pub fn new(
        config: &SessionConfig,
        key: &StreamKey,
        host: Collaborators,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let invite = InviteLink::issue(&config.invite_base_url, key)?;

        info!(%invite, "Session created");
        Ok(Self {
            guests: GuestRegistry::new(config.max_guests),
            source: SourceController::new(),
            chat: ChatChannel::new(),
            stats: StatsCollector::new(),
            invite,
            stream_title: config.stream_title.clone(),
            connection: ConnectionState::default(),
            history: VecDeque::with_capacity(
                config.chat_history_limit.min(INITIAL_HISTORY_CAPACITY),
            ),
            history_limit: config.chat_history_limit,
            host,
        })
    }

    /// Apply one input from the ordered input stream.
    pub fn apply(&mut self, input: SessionInput) -> SessionResult<Applied> {
        match input {
            SessionInput::Command(command) => self.handle_command(command),
            SessionInput::External(event) => self.handle_event(event),
        }
    }

    /// Apply an operator command.
    pub fn handle_command(&mut self, command: SessionCommand) -> SessionResult<Applied> {
        debug!(command = command.name(), "Handling command");

        match command {
            SessionCommand::Admit(id) => self.admit(id).map(|()| Applied::changed()),
            SessionCommand::Reject(id) => self.reject(id).map(|()| Applied::changed()),
            SessionCommand::Remove(id) => self.remove(id).map(|()| Applied::changed()),
            SessionCommand::ToggleFocus(id) => self.toggle_focus(id).map(|_| Applied::changed()),
            SessionCommand::SetGuestMuted { id, muted } => {
                let before = self.guests.revision();
                self.set_guest_muted(id, muted)?;
                Ok(Applied::from_change(self.guests.revision() != before))
            }
            SessionCommand::SetSource(mode) => Ok(Applied::from_change(self.set_source(mode))),
            SessionCommand::ToggleScreenAudio => {
                self.toggle_screen_audio();
                Ok(Applied::changed())
            }
            SessionCommand::SetDisplayMode(mode) => {
                self.set_display_mode(mode).map(Applied::from_change)
            }
            SessionCommand::ClearStreamError => {
                Ok(Applied::from_change(self.clear_stream_error()))
            }
            SessionCommand::EditDraft(text) => Ok(Applied::from_change(self.edit_draft(&text))),
            SessionCommand::SendChat => match self.send_chat()? {
                SendOutcome::Sent(text) => {
                    Ok(Applied::changed().with_notice(Notice::ChatSent { text }))
                }
                SendOutcome::Skipped(reason) => {
                    Ok(Applied::unchanged().with_notice(Notice::ChatSkipped { reason }))
                }
            },
            SessionCommand::SetChatDisabled(disabled) => {
                Ok(Applied::from_change(self.set_chat_disabled(disabled)))
            }
            SessionCommand::CopyInvite => {
                self.copy_invite()?;
                Ok(Applied::unchanged().with_notice(Notice::InviteCopied))
            }
            SessionCommand::ShareInvite => {
                let notice = match self.share_invite()? {
                    ShareOutcome::Shared => Notice::InviteShared,
                    ShareOutcome::Copied => Notice::InviteCopied,
                };
                Ok(Applied::unchanged().with_notice(notice))
            }
            // Answered by whoever drives the session.
            SessionCommand::GetSnapshot | SessionCommand::Shutdown => Ok(Applied::unchanged()),
        }
    }

    /// Apply a collaborator notification.
    pub fn handle_event(&mut self, event: ExternalEvent) -> SessionResult<Applied> {
        debug!(event = event.name(), "Handling external event");

        match event {
            ExternalEvent::JoinRequested(info) => {
                let name = info.name.clone();
                let id = self.request_join(info);
                Ok(Applied::changed().with_notice(Notice::GuestRequested { id, name }))
            }
            ExternalEvent::GuestLeft(id) => self.remove(id).map(|()| Applied::changed()),
            ExternalEvent::GuestAudioChanged { id, has_audio } => {
                let before = self.guests.revision();
                self.guests.set_has_audio(id, has_audio)?;
                Ok(Applied::from_change(self.guests.revision() != before))
            }
            ExternalEvent::SourceAcquired => Ok(Applied::from_change(self.source.mark_acquired())),
            ExternalEvent::SourceFailed { message } => {
                self.source.report_error(message);
                Ok(Applied::changed())
            }
            ExternalEvent::ViewerCountChanged(viewers) => {
                Ok(Applied::from_change(self.stats.update_viewers(viewers)))
            }
            ExternalEvent::LivenessChanged(live) => {
                Ok(Applied::from_change(self.stats.set_live(live)))
            }
            ExternalEvent::ChatReceived(message) => {
                self.receive_chat(message);
                Ok(Applied::changed())
            }
            ExternalEvent::ConnectionStateChanged(state) => {
                if state == self.connection {
                    return Ok(Applied::unchanged());
                }
                info!(state = %state.message(), "Connection state changed");
                self.connection = state;
                Ok(Applied::changed())
            }
        }
    }

    /// Record a guest's join request.
    pub fn request_join(&mut self, info: GuestInfo) -> GuestId {
        self.guests.request_join(info)
    }

    /// Admit a pending guest.
    pub fn admit(&mut self, id: GuestId) -> SessionResult<()> {
        self.guests.admit(id)
    }

    /// Reject a join request.
    pub fn reject(&mut self, id: GuestId) -> SessionResult<()> {
        self.guests.reject(id)
    }

    /// Remove a guest.
    pub fn remove(&mut self, id: GuestId) -> SessionResult<()> {
        self.guests.remove(id)
    }

    /// Toggle focus on a connected guest.
    pub fn toggle_focus(&mut self, id: GuestId) -> SessionResult<bool> {
        self.guests.toggle_focus(id)
    }

    /// Mute or unmute a guest.
    pub fn set_guest_muted(&mut self, id: GuestId, muted: bool) -> SessionResult<()> {
        self.guests.set_muted(id, muted)
    }

    /// Select the capture source and ask the media layer for it.
    ///
    /// A request the media layer refuses leaves the previous source and
    /// layout in place with the failure stored as the stream error.
    /// Returns true if the read model changed.
    #[instrument(skip(self))]
    pub fn set_source(&mut self, mode: SourceMode) -> bool {
        let previous = self.source.clone();
        if !self.source.set_source(mode) {
            return false;
        }

        if let Err(e) = self.host.media.request_source(mode) {
            self.source = previous;
            self.source
                .report_error(format!("Could not switch to {}: {e}", mode.name()));
        }
        true
    }

    /// Flip screen audio. Returns the flag now in effect.
    ///
    /// The flip is undone if the media layer refuses it.
    #[instrument(skip(self))]
    pub fn toggle_screen_audio(&mut self) -> bool {
        let previous = self.source.clone();
        if let Some(enabled) = self.source.toggle_screen_audio() {
            if let Err(e) = self.host.media.request_screen_audio(enabled) {
                self.source = previous;
                self.source
                    .report_error(format!("Could not change screen audio: {e}"));
            }
        }
        self.source.screen_with_audio()
    }

    /// Rearrange the panes. Returns true if anything changed.
    pub fn set_display_mode(&mut self, mode: DisplayMode) -> SessionResult<bool> {
        self.source.set_display_mode(mode)
    }

    /// Dismiss the stream error. Returns true if there was one.
    pub fn clear_stream_error(&mut self) -> bool {
        self.source.clear_error()
    }

    /// Replace the chat draft. Returns true if the draft changed.
    pub fn edit_draft(&mut self, text: &str) -> bool {
        self.chat.set_draft(text).changed
    }

    /// Send the chat draft if the channel allows it.
    pub fn send_chat(&mut self) -> SessionResult<SendOutcome> {
        let outcome = self
            .chat
            .send(self.stats.is_live(), self.host.chat.as_mut())?;
        if matches!(outcome, SendOutcome::Sent(_)) {
            self.stats.record_sent();
        }
        Ok(outcome)
    }

    /// Disable or enable chat input. Returns true if the flag changed.
    pub fn set_chat_disabled(&mut self, disabled: bool) -> bool {
        self.chat.set_disabled(disabled)
    }

    /// Copy the invite link to the clipboard.
    pub fn copy_invite(&mut self) -> SessionResult<()> {
        InviteIssuer::new(&self.invite, &self.stream_title).copy(self.host.clipboard.as_mut())
    }

    /// Share the invite link, falling back to the clipboard.
    pub fn share_invite(&mut self) -> SessionResult<ShareOutcome> {
        InviteIssuer::new(&self.invite, &self.stream_title)
            .share(self.host.share.as_mut(), self.host.clipboard.as_mut())
    }

    /// Read-only access to the invite link.
    pub fn invite(&self) -> InviteIssuer<'_> {
        InviteIssuer::new(&self.invite, &self.stream_title)
    }

    /// Returns true if the broadcast is live.
    pub fn is_live(&self) -> bool {
        self.stats.is_live()
    }

    /// Guest roster.
    pub fn guests(&self) -> &GuestRegistry {
        &self.guests
    }

    /// Source and layout state.
    pub fn source(&self) -> &SourceController {
        &self.source
    }

    /// Chat input state.
    pub fn chat(&self) -> &ChatChannel {
        &self.chat
    }

    /// Header statistics with the roster totals.
    pub fn header_stats(&self) -> HeaderStats {
        HeaderStats {
            guests: self.guests.counts(),
            ..self.stats.snapshot()
        }
    }

    /// Build the read model.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            roster: self.guests.snapshot(),
            source: self.source.snapshot(),
            invite_link: self.invite.as_str().to_string(),
            chat: self.chat.snapshot(self.stats.is_live()),
            stats: self.header_stats(),
            connection: self.connection.clone(),
            recent_messages: self.history.iter().cloned().collect(),
        }
    }

    fn receive_chat(&mut self, message: ChatMessage) {
        if self.history.len() == self.history_limit {
            self.history.pop_front();
        }
        self.history.push_back(message);
        self.stats.record_received();
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.guests.connected_count() > 0 {
            warn!(
                connected = self.guests.connected_count(),
                "Session closed with guests still connected"
            );
        }
    }
}
