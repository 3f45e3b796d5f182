//! Local stand-ins for the hosted collaborators.
//!
//! The headless console has no camera, clipboard or share sheet, so these
//! adapters log what a browser host would do and keep records in memory.

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::info;

use studio_engine::host::{
    AuthError, BroadcastRecord, BroadcastStore, ChatTransport, Clipboard, Collaborators,
    HostError, MediaControl, OperatorAuth, OperatorId, ShareHost, SharePayload, ShareResult,
    StoreError, StreamKey,
};
use studio_ipc::SourceMode;

/// Accepts any well-formed operator name.
#[derive(Debug, Default)]
pub struct LocalAuth;

impl OperatorAuth for LocalAuth {
    fn verify_operator(&mut self, credential: &str) -> Result<OperatorId, AuthError> {
        let name = credential.trim();
        let well_formed = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !well_formed {
            return Err(AuthError::InvalidCredential);
        }
        Ok(OperatorId(name.to_string()))
    }
}

/// In-memory broadcast records.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<BroadcastRecord>,
    created: u64,
}

impl BroadcastStore for MemoryStore {
    fn create_broadcast_record(
        &mut self,
        operator: &OperatorId,
        title: &str,
    ) -> Result<StreamKey, StoreError> {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| StoreError::Failed(e.to_string()))?
            .as_millis();
        self.created += 1;

        let stream_key = StreamKey(format!("{operator}-{millis:x}-{}", self.created));
        self.records.push(BroadcastRecord {
            stream_key: stream_key.clone(),
            operator: operator.clone(),
            title: title.to_string(),
        });
        Ok(stream_key)
    }

    fn delete_broadcast_record(&mut self, key: &StreamKey) -> Result<(), StoreError> {
        let index = self
            .records
            .iter()
            .position(|record| &record.stream_key == key)
            .ok_or_else(|| StoreError::NotFound(key.clone()))?;
        self.records.remove(index);
        Ok(())
    }

    fn list_active_broadcasts(&self) -> Vec<BroadcastRecord> {
        self.records.clone()
    }
}

/// Logs capture requests.
struct LogMedia;

impl MediaControl for LogMedia {
    fn request_source(&mut self, mode: SourceMode) -> Result<(), HostError> {
        info!(source = mode.name(), "Media: source requested");
        Ok(())
    }

    fn request_screen_audio(&mut self, enabled: bool) -> Result<(), HostError> {
        info!(enabled, "Media: screen audio requested");
        Ok(())
    }
}

/// Logs clipboard writes.
struct LogClipboard;

impl Clipboard for LogClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), HostError> {
        info!(%text, "Clipboard: text written");
        Ok(())
    }
}

/// A host without a native share sheet.
struct NoNativeShare;

impl ShareHost for NoNativeShare {
    fn native_share(&mut self, _payload: &SharePayload) -> ShareResult {
        ShareResult::Unsupported
    }
}

/// Logs outgoing chat messages.
struct LogChat;

impl ChatTransport for LogChat {
    fn dispatch(&mut self, text: &str) -> Result<(), HostError> {
        info!(%text, "Chat: message dispatched");
        Ok(())
    }
}

/// Collaborators for the headless console.
pub fn collaborators() -> Collaborators {
    Collaborators {
        media: Box::new(LogMedia),
        clipboard: Box::new(LogClipboard),
        share: Box::new(NoNativeShare),
        chat: Box::new(LogChat),
    }
}
