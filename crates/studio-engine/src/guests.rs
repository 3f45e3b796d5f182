//! Guest roster and admission lifecycle.

use tracing::{debug, info, instrument};

use studio_ipc::{GuestCounts, GuestId, GuestInfo, GuestStatus, GuestView, RosterSnapshot};

use crate::error::{InvalidOperation, SessionError};
use crate::SessionResult;

#[derive(Debug, Clone)]
struct Guest {
    id: GuestId,
    name: String,
    status: GuestStatus,
    has_audio: bool,
    muted: bool,
}

/// Owns every guest and the single focus slot.
///
/// Focus is stored as one optional id rather than a per-guest flag, so at
/// most one guest can ever be focused.
#[derive(Debug)]
pub struct GuestRegistry {
    guests: Vec<Guest>,
    focused: Option<GuestId>,
    next_id: u64,
    revision: u64,
    max_connected: Option<usize>,
}

impl GuestRegistry {
    /// Create an empty registry, optionally limiting connected guests.
    pub fn new(max_connected: Option<usize>) -> Self {
        Self {
            guests: Vec::new(),
            focused: None,
            next_id: 0,
            revision: 0,
            max_connected,
        }
    }

    /// Record a join request. The guest starts out pending.
    #[instrument(skip(self, info), fields(name = %info.name))]
    pub fn request_join(&mut self, info: GuestInfo) -> GuestId {
        self.next_id += 1;
        let id = GuestId(self.next_id);

        self.guests.push(Guest {
            id,
            name: info.name,
            status: GuestStatus::Pending,
            has_audio: info.has_audio,
            muted: false,
        });
        self.bump();

        info!(%id, has_audio = info.has_audio, "Join requested");
        id
    }

    /// Admit a pending guest.
    #[instrument(skip(self))]
    pub fn admit(&mut self, id: GuestId) -> SessionResult<()> {
        let connected = self.connected_count();
        let max_connected = self.max_connected;

        let guest = self.find_mut(id)?;
        if guest.status != GuestStatus::Pending {
            return Err(InvalidOperation::NotPending(id).into());
        }
        if let Some(max) = max_connected {
            if connected >= max {
                return Err(InvalidOperation::RosterFull { max }.into());
            }
        }

        guest.status = GuestStatus::Connected;
        self.bump();

        info!(%id, "Guest admitted");
        Ok(())
    }

    /// Reject a join request.
    #[instrument(skip(self))]
    pub fn reject(&mut self, id: GuestId) -> SessionResult<()> {
        self.delete(id)?;
        info!(%id, "Guest rejected");
        Ok(())
    }

    /// Remove a guest, whatever its status.
    #[instrument(skip(self))]
    pub fn remove(&mut self, id: GuestId) -> SessionResult<()> {
        self.delete(id)?;
        info!(%id, "Guest removed");
        Ok(())
    }

    /// Focus a connected guest, or clear focus if it is already focused.
    ///
    /// Returns whether the guest is focused afterwards.
    #[instrument(skip(self))]
    pub fn toggle_focus(&mut self, id: GuestId) -> SessionResult<bool> {
        let guest = self.find(id)?;
        if guest.status != GuestStatus::Connected {
            return Err(InvalidOperation::NotConnected(id).into());
        }

        let focused = if self.focused == Some(id) {
            self.focused = None;
            false
        } else {
            self.focused = Some(id);
            true
        };
        self.bump();

        debug!(%id, focused, "Focus toggled");
        Ok(focused)
    }

    /// Mute or unmute a connected guest that has audio.
    #[instrument(skip(self))]
    pub fn set_muted(&mut self, id: GuestId, muted: bool) -> SessionResult<()> {
        let guest = self.find_mut(id)?;
        if guest.status != GuestStatus::Connected {
            return Err(InvalidOperation::NotConnected(id).into());
        }
        if !guest.has_audio {
            return Err(InvalidOperation::NoAudio(id).into());
        }

        if guest.muted != muted {
            guest.muted = muted;
            self.bump();
            debug!(%id, muted, "Mute changed");
        }
        Ok(())
    }

    /// Apply a guest's audio capability change.
    ///
    /// Losing audio clears the mute flag. Focus is left alone.
    #[instrument(skip(self))]
    pub fn set_has_audio(&mut self, id: GuestId, has_audio: bool) -> SessionResult<()> {
        let guest = self.find_mut(id)?;
        if guest.has_audio == has_audio {
            return Ok(());
        }

        guest.has_audio = has_audio;
        if !has_audio {
            guest.muted = false;
        }
        self.bump();

        debug!(%id, has_audio, "Audio capability changed");
        Ok(())
    }

    /// Look up a guest.
    pub fn get(&self, id: GuestId) -> Option<GuestView> {
        self.guests
            .iter()
            .find(|guest| guest.id == id)
            .map(|guest| self.view(guest))
    }

    /// The focused guest, if any.
    pub fn focused(&self) -> Option<GuestId> {
        self.focused
    }

    /// Pending and connected totals for the header.
    pub fn counts(&self) -> GuestCounts {
        GuestCounts {
            pending: self.count(GuestStatus::Pending),
            connected: self.connected_count(),
        }
    }

    /// Number of admitted guests.
    pub fn connected_count(&self) -> usize {
        self.count(GuestStatus::Connected)
    }

    /// Number of guests in the roster.
    pub fn len(&self) -> usize {
        self.guests.len()
    }

    /// Returns true if the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.guests.is_empty()
    }

    /// Current roster revision.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Get the current roster in join-request order.
    pub fn snapshot(&self) -> RosterSnapshot {
        RosterSnapshot {
            revision: self.revision,
            guests: self.guests.iter().map(|guest| self.view(guest)).collect(),
        }
    }

    fn delete(&mut self, id: GuestId) -> SessionResult<()> {
        let index = self
            .guests
            .iter()
            .position(|guest| guest.id == id)
            .ok_or(SessionError::NotFound(id))?;

        self.guests.remove(index);
        if self.focused == Some(id) {
            self.focused = None;
        }
        self.bump();
        Ok(())
    }

    fn find(&self, id: GuestId) -> SessionResult<&Guest> {
        self.guests
            .iter()
            .find(|guest| guest.id == id)
            .ok_or(SessionError::NotFound(id))
    }

    fn find_mut(&mut self, id: GuestId) -> SessionResult<&mut Guest> {
        self.guests
            .iter_mut()
            .find(|guest| guest.id == id)
            .ok_or(SessionError::NotFound(id))
    }

    fn count(&self, status: GuestStatus) -> usize {
        self.guests
            .iter()
            .filter(|guest| guest.status == status)
            .count()
    }

    fn view(&self, guest: &Guest) -> GuestView {
        GuestView {
            id: guest.id,
            name: guest.name.clone(),
            status: guest.status,
            has_audio: guest.has_audio,
            muted: guest.muted,
            focused: self.focused == Some(guest.id),
        }
    }

    fn bump(&mut self) {
        self.revision += 1;
    }
}

impl Default for GuestRegistry {
    fn default() -> Self {
        Self::new(None)
    }
}
