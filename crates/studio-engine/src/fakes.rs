//! Recording collaborators for tests.

use std::sync::Arc;

use parking_lot::Mutex;

use studio_ipc::SourceMode;

use crate::host::{
    ChatTransport, Clipboard, Collaborators, HostError, MediaControl, ShareHost, SharePayload,
    ShareResult,
};

#[derive(Default)]
struct MediaLog {
    sources: Vec<SourceMode>,
    screen_audio: Vec<bool>,
    failing: bool,
}

#[derive(Clone, Default)]
pub struct FakeMedia(Arc<Mutex<MediaLog>>);

impl FakeMedia {
    pub fn sources(&self) -> Vec<SourceMode> {
        self.0.lock().sources.clone()
    }

    pub fn screen_audio(&self) -> Vec<bool> {
        self.0.lock().screen_audio.clone()
    }

    pub fn fail_requests(&self) {
        self.0.lock().failing = true;
    }
}

impl MediaControl for FakeMedia {
    fn request_source(&mut self, mode: SourceMode) -> Result<(), HostError> {
        let mut log = self.0.lock();
        log.sources.push(mode);
        if log.failing {
            return Err(HostError::Denied("camera permission".into()));
        }
        Ok(())
    }

    fn request_screen_audio(&mut self, enabled: bool) -> Result<(), HostError> {
        let mut log = self.0.lock();
        log.screen_audio.push(enabled);
        if log.failing {
            return Err(HostError::Failed("no loopback device".into()));
        }
        Ok(())
    }
}

#[derive(Default)]
struct ClipboardLog {
    writes: Vec<String>,
    attempts: usize,
    failing: bool,
}

#[derive(Clone, Default)]
pub struct FakeClipboard(Arc<Mutex<ClipboardLog>>);

impl FakeClipboard {
    pub fn failing() -> Self {
        let clipboard = Self::default();
        clipboard.fail_writes();
        clipboard
    }

    pub fn fail_writes(&self) {
        self.0.lock().failing = true;
    }

    pub fn writes(&self) -> Vec<String> {
        self.0.lock().writes.clone()
    }

    pub fn attempts(&self) -> usize {
        self.0.lock().attempts
    }
}

impl Clipboard for FakeClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), HostError> {
        let mut log = self.0.lock();
        log.attempts += 1;
        if log.failing {
            return Err(HostError::Denied("clipboard permission".into()));
        }
        log.writes.push(text.to_string());
        Ok(())
    }
}

struct ShareLog {
    result: ShareResult,
    payloads: Vec<SharePayload>,
}

#[derive(Clone)]
pub struct FakeShare(Arc<Mutex<ShareLog>>);

impl FakeShare {
    pub fn new(result: ShareResult) -> Self {
        Self(Arc::new(Mutex::new(ShareLog {
            result,
            payloads: Vec::new(),
        })))
    }

    pub fn set_result(&self, result: ShareResult) {
        self.0.lock().result = result;
    }

    pub fn payloads(&self) -> Vec<SharePayload> {
        self.0.lock().payloads.clone()
    }
}

impl ShareHost for FakeShare {
    fn native_share(&mut self, payload: &SharePayload) -> ShareResult {
        let mut log = self.0.lock();
        log.payloads.push(payload.clone());
        log.result.clone()
    }
}

#[derive(Default)]
struct ChatLog {
    sent: Vec<String>,
    failing: bool,
}

#[derive(Clone, Default)]
pub struct FakeChat(Arc<Mutex<ChatLog>>);

impl FakeChat {
    pub fn failing() -> Self {
        let chat = Self::default();
        chat.0.lock().failing = true;
        chat
    }

    pub fn sent(&self) -> Vec<String> {
        self.0.lock().sent.clone()
    }
}

impl ChatTransport for FakeChat {
    fn dispatch(&mut self, text: &str) -> Result<(), HostError> {
        let mut log = self.0.lock();
        if log.failing {
            return Err(HostError::Disconnected);
        }
        log.sent.push(text.to_string());
        Ok(())
    }
}

/// Test-side handles onto the collaborators given to a session.
pub struct FakeHandles {
    pub media: FakeMedia,
    pub clipboard: FakeClipboard,
    pub share: FakeShare,
    pub chat: FakeChat,
}

/// Collaborators with no native share, plus handles to inspect them.
pub fn fake_host() -> (Collaborators, FakeHandles) {
    let handles = FakeHandles {
        media: FakeMedia::default(),
        clipboard: FakeClipboard::default(),
        share: FakeShare::new(ShareResult::Unsupported),
        chat: FakeChat::default(),
    };

    let host = Collaborators {
        media: Box::new(handles.media.clone()),
        clipboard: Box::new(handles.clipboard.clone()),
        share: Box::new(handles.share.clone()),
        chat: Box::new(handles.chat.clone()),
    };

    (host, handles)
}
