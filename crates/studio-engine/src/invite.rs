//! Invite link issuing and sharing.

use std::fmt;

use tracing::{debug, info, warn};
use url::Url;

use studio_ipc::ConfigError;

use crate::error::SessionError;
use crate::host::{Clipboard, ShareHost, SharePayload, ShareResult, StreamKey};
use crate::SessionResult;

/// The join link of one broadcast. Fixed once issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteLink(String);

impl InviteLink {
    /// Build the link for a broadcast by appending its stream key to the base URL.
    pub fn issue(base_url: &str, key: &StreamKey) -> Result<Self, ConfigError> {
        let mut url = Url::parse(base_url)
            .map_err(|e| ConfigError::InvalidInviteUrl(format!("{base_url}: {e}")))?;

        url.path_segments_mut()
            .map_err(|()| ConfigError::InvalidInviteUrl(base_url.to_string()))?
            .pop_if_empty()
            .push(key.as_str());

        Ok(Self(url.into()))
    }

    /// Borrow the link.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InviteLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How an invite ended up with the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// Handed to the native share sheet.
    Shared,

    /// Written to the clipboard.
    Copied,
}

/// Read-only access to the invite link with copy and share actions.
pub struct InviteIssuer<'a> {
    link: &'a InviteLink,
    title: &'a str,
}

impl<'a> InviteIssuer<'a> {
    /// Borrow a link for issuing.
    pub fn new(link: &'a InviteLink, title: &'a str) -> Self {
        Self { link, title }
    }

    /// The invite link.
    pub fn link(&self) -> &'a str {
        self.link.as_str()
    }

    /// Copy the link to the clipboard.
    pub fn copy(&self, clipboard: &mut dyn Clipboard) -> SessionResult<()> {
        clipboard.write_text(self.link.as_str()).map_err(|e| {
            warn!(error = %e, "Clipboard write failed");
            SessionError::ExternalFailure(format!("Could not copy invite link: {e}"))
        })?;

        info!("Invite link copied");
        Ok(())
    }

    /// Share the link natively, or copy it when that is not possible.
    ///
    /// The capability is probed on every call. A missing or failing share
    /// sheet always ends in [`Self::copy`], so the link can be obtained on
    /// every host.
    pub fn share(
        &self,
        share: &mut dyn ShareHost,
        clipboard: &mut dyn Clipboard,
    ) -> SessionResult<ShareOutcome> {
        let payload = SharePayload {
            title: self.title.to_string(),
            url: self.link.as_str().to_string(),
        };

        match native_share(share, &payload) {
            Ok(()) => {
                info!("Invite link shared");
                return Ok(ShareOutcome::Shared);
            }
            Err(e @ SessionError::CapabilityUnavailable(_)) => {
                debug!(error = %e, "Copying invite instead");
            }
            Err(e) => {
                warn!(error = %e, "Copying invite instead");
            }
        }

        self.copy(clipboard).map(|()| ShareOutcome::Copied)
    }
}

/// Probe the host share sheet once.
fn native_share(share: &mut dyn ShareHost, payload: &SharePayload) -> SessionResult<()> {
    match share.native_share(payload) {
        ShareResult::Shared => Ok(()),
        ShareResult::Unsupported => Err(SessionError::CapabilityUnavailable(
            "native share".to_string(),
        )),
        ShareResult::Failed(reason) => Err(SessionError::ExternalFailure(format!(
            "Native share failed: {reason}"
        ))),
    }
}
