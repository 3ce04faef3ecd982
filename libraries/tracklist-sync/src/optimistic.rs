//! Optimistic reconciliation
//!
//! Applies a mutation to the store before the server confirms it and either
//! commits the server's entity or reverts when the call fails.

use crate::store::CollectionStore;
use tracing::{debug, warn};
use tracklist_core::{Track, TrackDraft, TrackId};

/// Snapshot of an optimistically removed entry, kept until the server answers
#[derive(Debug, Clone, PartialEq)]
#[must_use = "a pending removal must be confirmed or restored"]
pub struct PendingRemoval {
    track: Track,
    index: usize,
}

impl PendingRemoval {
    pub fn id(&self) -> &TrackId {
        &self.track.id
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    /// Position the entry occupied when it was removed
    pub fn index(&self) -> usize {
        self.index
    }

    /// Server confirmed the delete
    pub fn confirm(self) -> Track {
        self.track
    }
}

impl CollectionStore {
    /// Insert a placeholder for `draft` at the head of the list.
    ///
    /// The returned id is provisional and is never sent to the server.
    pub fn insert_provisional(&mut self, draft: &TrackDraft) -> TrackId {
        let id = TrackId::provisional();
        let track = Track::provisional(id.clone(), draft);
        self.tracks_mut().insert(0, track);
        debug!(track_id = %id, "Inserted provisional track");
        id
    }

    /// Swap the placeholder for the server's entity.
    ///
    /// If a re-fetch already replaced the list and the placeholder is gone,
    /// the entity is prepended unless the fetch brought it in already.
    /// Returns `true` when the placeholder was still present.
    pub fn confirm_provisional(&mut self, provisional: &TrackId, track: Track) -> bool {
        let server_id = track.id.clone();
        match self.position(provisional) {
            Some(index) => {
                let tracks = self.tracks_mut();
                tracks[index] = track;
                // A fetch may have loaded the same entity before we got here
                let mut seen = false;
                tracks.retain(|t| {
                    if t.id != server_id {
                        return true;
                    }
                    let keep = !seen;
                    seen = true;
                    keep
                });
                debug!(%provisional, track_id = %server_id, "Confirmed provisional track");
                true
            }
            None => {
                if !self.contains(&server_id) {
                    self.tracks_mut().insert(0, track);
                }
                debug!(%provisional, track_id = %server_id, "Provisional track superseded by fetch");
                false
            }
        }
    }

    /// Remove the placeholder after a failed create
    pub fn discard_provisional(&mut self, provisional: &TrackId) -> bool {
        let removed = self.remove(provisional).is_some();
        if removed {
            warn!(%provisional, "Rolled back provisional track");
        }
        removed
    }

    /// Remove `id` ahead of the server call, keeping a snapshot to restore
    pub fn remove_optimistic(&mut self, id: &TrackId) -> Option<PendingRemoval> {
        let index = self.position(id)?;
        let track = self.tracks_mut().remove(index);
        debug!(track_id = %id, index, "Optimistically removed track");
        Some(PendingRemoval { track, index })
    }

    /// Put a removed entry back after the server refused the delete.
    ///
    /// The entry returns to the head of the list. Nothing happens if a fetch
    /// in the meantime already brought it back.
    pub fn restore(&mut self, pending: PendingRemoval) -> bool {
        if self.contains(&pending.track.id) {
            return false;
        }
        warn!(track_id = %pending.track.id, "Restoring track after failed delete");
        self.tracks_mut().insert(0, pending.track);
        true
    }
}
