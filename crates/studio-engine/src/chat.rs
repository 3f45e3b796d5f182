//! Operator chat input.

use tracing::{debug, info, instrument, warn};

use studio_ipc::{ChatSkipReason, ChatSnapshot};

use crate::error::SessionError;
use crate::host::ChatTransport;
use crate::SessionResult;

/// Maximum draft length in characters.
pub const MAX_DRAFT_CHARS: usize = 200;

/// Draft length from which the counter warns.
pub const DRAFT_WARNING_CHARS: usize = 150;

/// Result of a send attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Message dispatched; carries the sent text.
    Sent(String),

    /// Nothing dispatched and the draft left untouched.
    Skipped(ChatSkipReason),
}

/// What a draft edit did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DraftEdit {
    /// The stored draft differs from before.
    pub changed: bool,

    /// Input past [`MAX_DRAFT_CHARS`] was dropped.
    pub truncated: bool,
}

/// Owns the operator's unsent chat text.
#[derive(Debug, Default)]
pub struct ChatChannel {
    draft: String,
    disabled: bool,
}

impl ChatChannel {
    /// Create an empty, enabled channel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the draft, truncating past [`MAX_DRAFT_CHARS`].
    pub fn set_draft(&mut self, text: &str) -> DraftEdit {
        let draft: String = text.chars().take(MAX_DRAFT_CHARS).collect();
        let truncated = draft.len() < text.len();
        if truncated {
            debug!(max = MAX_DRAFT_CHARS, "Draft truncated");
        }

        let changed = draft != self.draft;
        self.draft = draft;
        DraftEdit { changed, truncated }
    }

    /// Disable or enable the channel. Returns true if the flag changed.
    pub fn set_disabled(&mut self, disabled: bool) -> bool {
        std::mem::replace(&mut self.disabled, disabled) != disabled
    }

    /// The current draft.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Draft length in characters.
    pub fn char_count(&self) -> usize {
        self.draft.chars().count()
    }

    /// Returns true if the draft is near the limit.
    pub fn is_warning(&self) -> bool {
        (DRAFT_WARNING_CHARS..MAX_DRAFT_CHARS).contains(&self.char_count())
    }

    /// Returns true if the channel is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Check whether a send would dispatch right now.
    pub fn check_send(&self, is_live: bool) -> Result<(), ChatSkipReason> {
        if self.disabled {
            return Err(ChatSkipReason::Disabled);
        }
        if !is_live {
            return Err(ChatSkipReason::NotLive);
        }
        if self.draft.trim().is_empty() {
            return Err(ChatSkipReason::EmptyDraft);
        }
        Ok(())
    }

    /// Send the draft through the transport.
    ///
    /// Skips without side effects when disabled, offline or empty. The
    /// draft is cleared only after the transport accepts the message.
    #[instrument(skip(self, transport))]
    pub fn send(
        &mut self,
        is_live: bool,
        transport: &mut dyn ChatTransport,
    ) -> SessionResult<SendOutcome> {
        if let Err(reason) = self.check_send(is_live) {
            debug!(reason = reason.message(), "Send skipped");
            return Ok(SendOutcome::Skipped(reason));
        }

        let text = self.draft.trim().to_string();
        transport.dispatch(&text).map_err(|e| {
            warn!(error = %e, "Chat dispatch failed");
            SessionError::ExternalFailure(format!("Could not send message: {e}"))
        })?;

        self.draft.clear();
        info!(chars = text.chars().count(), "Chat message sent");
        Ok(SendOutcome::Sent(text))
    }

    /// Get the current chat input state.
    pub fn snapshot(&self, is_live: bool) -> ChatSnapshot {
        ChatSnapshot {
            draft: self.draft.clone(),
            char_count: self.char_count(),
            max_chars: MAX_DRAFT_CHARS,
            warning: self.is_warning(),
            disabled: self.disabled,
            can_send: self.check_send(is_live).is_ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::FakeChat;

    #[test]
    fn test_draft_length_boundaries() {
        let mut chat = ChatChannel::new();

        assert!(!chat.set_draft(&"a".repeat(199)).truncated);
        assert_eq!(chat.char_count(), 199);

        assert!(!chat.set_draft(&"a".repeat(200)).truncated);
        assert_eq!(chat.char_count(), 200);

        assert!(chat.set_draft(&"a".repeat(201)).truncated);
        assert_eq!(chat.char_count(), 200);
        assert_eq!(chat.draft(), "a".repeat(200));
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let mut chat = ChatChannel::new();

        assert!(!chat.set_draft(&"é".repeat(200)).truncated);
        assert_eq!(chat.char_count(), 200);

        assert!(chat.set_draft(&"é".repeat(250)).truncated);
        assert_eq!(chat.draft(), "é".repeat(200));
    }

    #[test]
    fn test_identical_draft_is_unchanged() {
        let mut chat = ChatChannel::new();

        assert!(chat.set_draft("hello").changed);
        assert!(!chat.set_draft("hello").changed);

        chat.set_draft(&"a".repeat(200));
        let edit = chat.set_draft(&"a".repeat(230));
        assert!(edit.truncated);
        assert!(!edit.changed);

        assert!(chat.set_disabled(true));
        assert!(!chat.set_disabled(true));
    }

    #[test]
    fn test_warning_range() {
        let mut chat = ChatChannel::new();

        chat.set_draft(&"a".repeat(149));
        assert!(!chat.is_warning());
        chat.set_draft(&"a".repeat(150));
        assert!(chat.is_warning());
        chat.set_draft(&"a".repeat(199));
        assert!(chat.is_warning());
        chat.set_draft(&"a".repeat(200));
        assert!(!chat.is_warning());
    }

    #[test]
    fn test_send_dispatches_trimmed_and_clears() {
        let mut chat = ChatChannel::new();
        let mut transport = FakeChat::default();
        chat.set_draft("  hello chat  ");

        let outcome = chat.send(true, &mut transport).unwrap();

        assert_eq!(outcome, SendOutcome::Sent("hello chat".into()));
        assert_eq!(transport.sent(), vec!["hello chat".to_string()]);
        assert_eq!(chat.draft(), "");
    }

    #[test]
    fn test_send_gates_independently_and_combined() {
        let drafts = ["", "   \n\t", "hello"];

        for draft in drafts {
            for is_live in [false, true] {
                for disabled in [false, true] {
                    let mut chat = ChatChannel::new();
                    let mut transport = FakeChat::default();
                    chat.set_draft(draft);
                    chat.set_disabled(disabled);

                    // Repeated calls never dispatch when gated.
                    for _ in 0..3 {
                        let outcome = chat.send(is_live, &mut transport).unwrap();
                        let should_send = draft == "hello" && is_live && !disabled;
                        if should_send {
                            break;
                        }
                        assert!(matches!(outcome, SendOutcome::Skipped(_)));
                        assert_eq!(chat.draft(), draft);
                    }

                    let expected = usize::from(draft == "hello" && is_live && !disabled);
                    assert_eq!(transport.sent().len(), expected);
                }
            }
        }
    }

    #[test]
    fn test_skip_reasons() {
        let mut chat = ChatChannel::new();
        let mut transport = FakeChat::default();

        assert_eq!(
            chat.send(true, &mut transport),
            Ok(SendOutcome::Skipped(ChatSkipReason::EmptyDraft))
        );

        chat.set_draft("hi");
        assert_eq!(
            chat.send(false, &mut transport),
            Ok(SendOutcome::Skipped(ChatSkipReason::NotLive))
        );

        chat.set_disabled(true);
        assert_eq!(
            chat.send(true, &mut transport),
            Ok(SendOutcome::Skipped(ChatSkipReason::Disabled))
        );
    }

    #[test]
    fn test_transport_failure_keeps_draft() {
        let mut chat = ChatChannel::new();
        let mut transport = FakeChat::failing();
        chat.set_draft("hello");

        let result = chat.send(true, &mut transport);

        assert!(matches!(result, Err(SessionError::ExternalFailure(_))));
        assert_eq!(chat.draft(), "hello");
    }

    #[test]
    fn test_snapshot_reflects_gates() {
        let mut chat = ChatChannel::new();
        chat.set_draft(&"x".repeat(160));

        let live = chat.snapshot(true);
        assert_eq!(live.char_count, 160);
        assert_eq!(live.max_chars, MAX_DRAFT_CHARS);
        assert!(live.warning);
        assert!(live.can_send);

        assert!(!chat.snapshot(false).can_send);
    }
}
