//! Tracks controller
//!
//! Drives the server round trips and commits their results to the
//! [`CollectionStore`]. Locks are only taken for the synchronous transition
//! before and after each awaited call, never across it.

use crate::error::{Result, SyncError};
use crate::genres::GenreCatalog;
use crate::optimistic::PendingRemoval;
use crate::store::{distinct_artists, CollectionStore, FetchOutcome};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use tracklist_core::types::DEFAULT_MAX_UPLOAD_BYTES;
use tracklist_core::validation::{validate_draft, validate_upload};
use tracklist_core::{AudioUpload, QueryParams, Track, TrackDraft, TrackId, TracksApi};

/// Page size used when none is configured
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Page size used when walking the whole collection for artists
pub const DEFAULT_ARTIST_SCAN_LIMIT: u32 = 100;

/// Result of an update that the server accepted
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// Entry replaced in place
    Replaced(Track),
    /// Server updated the track but it is not on the loaded page
    NotLoaded(Track),
}

impl UpdateOutcome {
    pub fn track(&self) -> &Track {
        match self {
            Self::Replaced(track) | Self::NotLoaded(track) => track,
        }
    }
}

/// Partition of a bulk delete
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkDeleteSummary {
    pub succeeded: Vec<TrackId>,
    pub failed: Vec<TrackId>,
}

impl BulkDeleteSummary {
    /// Every requested id was deleted
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Async front of the collection store.
pub struct TracksController<A> {
    api: A,
    store: RwLock<CollectionStore>,
    genres: RwLock<GenreCatalog>,
    page_limit: u32,
    artist_scan_limit: u32,
    max_upload_bytes: u64,
}

impl<A: TracksApi> TracksController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            store: RwLock::new(CollectionStore::new()),
            genres: RwLock::new(GenreCatalog::new()),
            page_limit: DEFAULT_PAGE_LIMIT,
            artist_scan_limit: DEFAULT_ARTIST_SCAN_LIMIT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    #[must_use]
    pub fn with_page_limit(mut self, limit: u32) -> Self {
        self.page_limit = limit.max(1);
        self
    }

    #[must_use]
    pub fn with_artist_scan_limit(mut self, limit: u32) -> Self {
        self.artist_scan_limit = limit.max(1);
        self
    }

    #[must_use]
    pub fn with_max_upload_bytes(mut self, max_bytes: u64) -> Self {
        self.max_upload_bytes = max_bytes;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn page_limit(&self) -> u32 {
        self.page_limit
    }

    /// Run `f` against the current store state
    pub async fn read<R>(&self, f: impl FnOnce(&CollectionStore) -> R) -> R {
        f(&*self.store.read().await)
    }

    /// Owned copy of the store for rendering
    pub async fn snapshot(&self) -> CollectionStore {
        self.store.read().await.clone()
    }

    /// Run `f` against the genre catalog
    pub async fn read_genres<R>(&self, f: impl FnOnce(&GenreCatalog) -> R) -> R {
        f(&*self.genres.read().await)
    }

    // ===== Fetching =====

    /// Load one page.
    ///
    /// Overlapping calls are allowed; only the most recently issued one is
    /// committed, the others come back as [`FetchOutcome::Stale`].
    pub async fn fetch_page(&self, query: QueryParams) -> FetchOutcome {
        let ticket = self.store.write().await.begin_fetch(query);
        debug!(seq = ticket.seq(), "Requesting page {}", ticket.query().page);

        let result = self.api.list_tracks(ticket.query(), self.page_limit).await;

        self.store.write().await.complete_fetch(ticket, result)
    }

    /// Repeat the last applied query (page 1 defaults if none)
    pub async fn refetch(&self) -> FetchOutcome {
        let query = self
            .read(|store| store.last_query().cloned())
            .await
            .unwrap_or_default();
        self.fetch_page(query).await
    }

    // ===== Create / update =====

    /// Create on the server, then prepend the confirmed entity
    pub async fn create(&self, draft: &TrackDraft) -> Result<Track> {
        let draft = self.validated(draft).await?;

        match self.api.create_track(&draft).await {
            Ok(track) => {
                info!(track_id = %track.id, "Created track {}", track.title);
                self.store.write().await.prepend(track.clone());
                Ok(track)
            }
            Err(err) => Err(self.record(err).await),
        }
    }

    /// Show the track immediately under a provisional id, then reconcile
    pub async fn create_optimistic(&self, draft: &TrackDraft) -> Result<Track> {
        let draft = self.validated(draft).await?;
        let provisional = self.store.write().await.insert_provisional(&draft);

        match self.api.create_track(&draft).await {
            Ok(track) => {
                info!(%provisional, track_id = %track.id, "Created track {}", track.title);
                self.store
                    .write()
                    .await
                    .confirm_provisional(&provisional, track.clone());
                Ok(track)
            }
            Err(err) => {
                self.store.write().await.discard_provisional(&provisional);
                Err(self.record(err).await)
            }
        }
    }

    pub async fn update(&self, id: &TrackId, draft: &TrackDraft) -> Result<UpdateOutcome> {
        let draft = self.validated(draft).await?;

        match self.api.update_track(id, &draft).await {
            Ok(track) => {
                info!(track_id = %track.id, "Updated track");
                if self.store.write().await.replace(track.clone()) {
                    Ok(UpdateOutcome::Replaced(track))
                } else {
                    Ok(UpdateOutcome::NotLoaded(track))
                }
            }
            Err(err) => Err(self.record(err).await),
        }
    }

    // ===== Delete =====

    /// Delete on the server, then drop the entry
    pub async fn delete(&self, id: &TrackId) -> Result<()> {
        match self.api.delete_track(id).await {
            Ok(()) => {
                info!(track_id = %id, "Deleted track");
                self.store.write().await.remove(id);
                Ok(())
            }
            Err(err) => Err(self.record(err).await),
        }
    }

    /// Drop the entry first and put it back if the server refuses
    pub async fn delete_optimistic(&self, id: &TrackId) -> Result<()> {
        let pending = self.store.write().await.remove_optimistic(id);

        match self.api.delete_track(id).await {
            Ok(()) => {
                info!(track_id = %id, "Deleted track");
                Ok(())
            }
            Err(err) => {
                if let Some(pending) = pending {
                    self.store.write().await.restore(pending);
                }
                Err(self.record(err).await)
            }
        }
    }

    /// Delete many tracks; only the ids the server confirms leave the list
    pub async fn bulk_delete(&self, ids: &[TrackId]) -> Result<BulkDeleteSummary> {
        if ids.is_empty() {
            return Ok(BulkDeleteSummary::default());
        }

        match self.api.delete_tracks(ids).await {
            Ok(result) => {
                self.store.write().await.apply_bulk_delete(&result);
                info!(
                    succeeded = result.success.len(),
                    failed = result.failed.len(),
                    "Bulk delete finished"
                );
                Ok(BulkDeleteSummary {
                    succeeded: result.success,
                    failed: result.failed,
                })
            }
            Err(err) => Err(self.record(err).await),
        }
    }

    /// Remove every target up front; restore whatever the server did not
    /// delete, or all of them if the call itself failed
    pub async fn bulk_delete_optimistic(&self, ids: &[TrackId]) -> Result<BulkDeleteSummary> {
        if ids.is_empty() {
            return Ok(BulkDeleteSummary::default());
        }

        let pending: Vec<PendingRemoval> = {
            let mut store = self.store.write().await;
            ids.iter().filter_map(|id| store.remove_optimistic(id)).collect()
        };

        match self.api.delete_tracks(ids).await {
            Ok(result) => {
                let undeleted = pending
                    .into_iter()
                    .filter(|p| !result.success.contains(p.id()));
                self.restore_all(undeleted).await;
                info!(
                    succeeded = result.success.len(),
                    failed = result.failed.len(),
                    "Bulk delete finished"
                );
                Ok(BulkDeleteSummary {
                    succeeded: result.success,
                    failed: result.failed,
                })
            }
            Err(err) => {
                self.restore_all(pending).await;
                Err(self.record(err).await)
            }
        }
    }

    // ===== Audio files =====

    pub async fn upload_audio(&self, id: &TrackId, upload: &AudioUpload) -> Result<Track> {
        validate_upload(upload, self.max_upload_bytes)?;

        match self.api.upload_audio(id, upload).await {
            Ok(track) => {
                info!(track_id = %id, bytes = upload.len(), "Uploaded audio file");
                self.store.write().await.replace(track.clone());
                Ok(track)
            }
            Err(err) => Err(self.record(err).await),
        }
    }

    pub async fn delete_audio(&self, id: &TrackId) -> Result<Track> {
        match self.api.delete_audio(id).await {
            Ok(track) => {
                info!(track_id = %id, "Removed audio file");
                self.store.write().await.replace(track.clone());
                Ok(track)
            }
            Err(err) => Err(self.record(err).await),
        }
    }

    // ===== Catalogs =====

    /// Walk every page and store the distinct artist names
    pub async fn refresh_artists(&self) -> Result<Vec<String>> {
        let mut query = QueryParams::default();
        let mut tracks = Vec::new();

        loop {
            let page = match self.api.list_tracks(&query, self.artist_scan_limit).await {
                Ok(page) => page,
                Err(err) => return Err(self.record(err).await),
            };
            let done = page.data.is_empty() || query.page >= page.meta.total_pages;
            tracks.extend(page.data);
            if done {
                break;
            }
            query.page += 1;
        }

        let artists = distinct_artists(&tracks);
        debug!(tracks = tracks.len(), artists = artists.len(), "Artist scan finished");
        self.store.write().await.set_artists(artists.clone());
        Ok(artists)
    }

    pub async fn refresh_genres(&self) -> Result<Vec<String>> {
        self.genres.write().await.begin_load();
        let result = self.api.list_genres().await;

        let mut genres = self.genres.write().await;
        genres.complete_load(result.clone());
        match result {
            Ok(_) => Ok(genres.genres().to_vec()),
            Err(err) => {
                warn!(error = %err, "Failed to load genres");
                Err(err)
            }
        }
    }

    // ===== Internal =====

    async fn validated(&self, draft: &TrackDraft) -> Result<TrackDraft> {
        let genres = self.genres.read().await;
        validate_draft(draft, genres.known())
    }

    async fn restore_all(&self, pending: impl IntoIterator<Item = PendingRemoval>) {
        let pending: Vec<PendingRemoval> = pending.into_iter().collect();
        if pending.is_empty() {
            return;
        }
        let mut store = self.store.write().await;
        // Head insertion in reverse keeps the original relative order
        for removal in pending.into_iter().rev() {
            store.restore(removal);
        }
    }

    async fn record(&self, err: SyncError) -> SyncError {
        warn!(error = %err, "Track operation failed");
        self.store.write().await.record_error(err.clone());
        err
    }
}
