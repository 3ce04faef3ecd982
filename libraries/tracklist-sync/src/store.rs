//! Collection store
//!
//! Owns the current page of tracks, its pagination metadata, loading/error
//! status and the derived artist list. Every method is a synchronous state
//! transition; async round trips live in the controller.

use crate::error::SyncError;
use tracing::{debug, warn};
use tracklist_core::{BulkDeleteResult, PageMeta, QueryParams, Track, TrackId, TrackPage};

/// Handle for an issued fetch, consumed when its response arrives
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a fetch ticket must be completed"]
pub struct FetchTicket {
    seq: u64,
    query: QueryParams,
}

impl FetchTicket {
    /// Query this fetch was issued for
    pub fn query(&self) -> &QueryParams {
        &self.query
    }

    /// Monotonic issue number
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// What happened to a completed fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Response committed: list and metadata replaced
    Applied,
    /// Request failed; previous list kept, error recorded
    Failed(SyncError),
    /// A newer fetch was issued in the meantime; response discarded
    Stale,
}

/// Reducer-style state container for the track list.
#[derive(Debug, Clone, Default)]
pub struct CollectionStore {
    tracks: Vec<Track>,
    meta: PageMeta,
    meta_stale: bool,
    loading: bool,
    error: Option<SyncError>,
    artists: Vec<String>,
    /// Sequence number of the most recently issued fetch
    issued: u64,
    /// Query of the last fetch that was applied
    last_query: Option<QueryParams>,
}

impl CollectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Read access =====

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Ids in list order
    pub fn ids(&self) -> Vec<TrackId> {
        self.tracks.iter().map(|t| t.id.clone()).collect()
    }

    pub fn get(&self, id: &TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| &t.id == id)
    }

    pub fn contains(&self, id: &TrackId) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn meta(&self) -> &PageMeta {
        &self.meta
    }

    /// Whether the list was mutated locally since the last applied fetch
    pub fn is_meta_stale(&self) -> bool {
        self.meta_stale
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&SyncError> {
        self.error.as_ref()
    }

    /// Distinct artists for the filter control
    pub fn artists(&self) -> &[String] {
        &self.artists
    }

    /// Last query whose response was applied; re-fetch target after failures
    pub fn last_query(&self) -> Option<&QueryParams> {
        self.last_query.as_ref()
    }

    /// Whether `ticket` is still the most recently issued fetch
    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.seq == self.issued
    }

    // ===== Fetch cycle =====

    /// Record that a fetch for `query` has been issued
    pub fn begin_fetch(&mut self, query: QueryParams) -> FetchTicket {
        self.issued += 1;
        self.loading = true;
        self.error = None;
        debug!(seq = self.issued, page = query.page, "Fetch issued");
        FetchTicket {
            seq: self.issued,
            query,
        }
    }

    /// Commit the response of a fetch.
    ///
    /// Only the most recently issued fetch may touch the store. On success
    /// the list and metadata are replaced together; on failure the list is
    /// kept. Either way loading ends.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<TrackPage, SyncError>,
    ) -> FetchOutcome {
        if !self.is_current(&ticket) {
            warn!(
                seq = ticket.seq,
                latest = self.issued,
                "Discarding stale fetch response"
            );
            return FetchOutcome::Stale;
        }

        self.loading = false;
        match result {
            Ok(page) => {
                debug!(
                    seq = ticket.seq,
                    tracks = page.data.len(),
                    total = page.meta.total,
                    "Fetch applied"
                );
                self.tracks = dedup_by_id(page.data);
                self.meta = page.meta;
                self.meta_stale = false;
                self.error = None;
                self.last_query = Some(ticket.query);
                FetchOutcome::Applied
            }
            Err(err) => {
                warn!(seq = ticket.seq, error = %err, "Fetch failed");
                self.error = Some(err.clone());
                FetchOutcome::Failed(err)
            }
        }
    }

    // ===== Confirmed mutations =====

    /// Put a server-confirmed track at the head of the list
    pub fn prepend(&mut self, track: Track) {
        self.tracks.retain(|t| t.id != track.id);
        self.tracks.insert(0, track);
        self.meta_stale = true;
    }

    /// Replace the entry with the same id in place.
    ///
    /// Returns `false` (and changes nothing) when the id is not loaded; that
    /// is a missed refresh, not an error.
    pub fn replace(&mut self, track: Track) -> bool {
        match self.position(&track.id) {
            Some(index) => {
                self.tracks[index] = track;
                self.meta_stale = true;
                true
            }
            None => {
                debug!(track_id = %track.id, "Replace target not loaded");
                false
            }
        }
    }

    /// Remove an entry by id, returning it
    pub fn remove(&mut self, id: &TrackId) -> Option<Track> {
        let index = self.position(id)?;
        self.meta_stale = true;
        Some(self.tracks.remove(index))
    }

    /// Drop the ids the server reports as deleted; failed ids stay
    pub fn apply_bulk_delete(&mut self, result: &BulkDeleteResult) -> usize {
        let before = self.tracks.len();
        self.tracks.retain(|t| !result.success.contains(&t.id));
        let removed = before - self.tracks.len();
        if removed > 0 {
            self.meta_stale = true;
        }
        removed
    }

    pub fn set_artists(&mut self, artists: Vec<String>) {
        self.artists = artists;
    }

    /// Record a failure from a mutation path
    pub fn record_error(&mut self, error: SyncError) {
        self.error = Some(error);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    // ===== Internal primitives =====

    pub(crate) fn position(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| &t.id == id)
    }

    pub(crate) fn tracks_mut(&mut self) -> &mut Vec<Track> {
        self.meta_stale = true;
        &mut self.tracks
    }
}

/// Deduplicated, sorted artist names
pub fn distinct_artists<'a>(tracks: impl IntoIterator<Item = &'a Track>) -> Vec<String> {
    let mut artists: Vec<String> = tracks
        .into_iter()
        .map(|t| t.artist.trim())
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect();
    artists.sort();
    artists.dedup();
    artists
}

// The server should never repeat an id within a page; keep the first if it does.
fn dedup_by_id(tracks: Vec<Track>) -> Vec<Track> {
    let mut seen = std::collections::HashSet::with_capacity(tracks.len());
    tracks
        .into_iter()
        .filter(|t| seen.insert(t.id.clone()))
        .collect()
}
