/// Core traits for Tracklist
use crate::error::Result;
use crate::types::{AudioUpload, BulkDeleteResult, QueryParams, Track, TrackDraft, TrackId, TrackPage};
use async_trait::async_trait;

/// Tracks backend
///
/// Implementers talk to the server of record. The sync layer only depends on
/// this trait, so tests can drive it with in-memory fakes.
///
/// Implementations must refuse provisional ids with `SyncError::InvalidInput`
/// instead of sending them over the wire.
#[async_trait]
pub trait TracksApi: Send + Sync {
    /// Fetch one page of tracks for the given query
    async fn list_tracks(&self, query: &QueryParams, limit: u32) -> Result<TrackPage>;

    /// Create a track, returning the server entity
    async fn create_track(&self, draft: &TrackDraft) -> Result<Track>;

    /// Replace a track's metadata, returning the server entity
    async fn update_track(&self, id: &TrackId, draft: &TrackDraft) -> Result<Track>;

    /// Delete a single track
    async fn delete_track(&self, id: &TrackId) -> Result<()>;

    /// Delete many tracks, partitioned into succeeded and failed ids
    async fn delete_tracks(&self, ids: &[TrackId]) -> Result<BulkDeleteResult>;

    /// Attach (or replace) the audio file of a track
    async fn upload_audio(&self, id: &TrackId, upload: &AudioUpload) -> Result<Track>;

    /// Remove the audio file of a track
    async fn delete_audio(&self, id: &TrackId) -> Result<Track>;

    /// List the genres a track may be tagged with
    async fn list_genres(&self) -> Result<Vec<String>>;
}
