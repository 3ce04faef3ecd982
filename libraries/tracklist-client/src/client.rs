//! HTTP client for the tracks backend.

use crate::config::ServerSettings;
use crate::error::{ClientError, Result};
use crate::types::{ApiErrorBody, BulkDeleteRequest};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};
use tracklist_core::{
    AudioUpload, BulkDeleteResult, QueryParams, Track, TrackDraft, TrackId, TrackPage, TracksApi,
};
use url::Url;

/// Client for the tracks REST backend.
///
/// Every method performs exactly one HTTP round trip. Status codes are mapped
/// onto [`ClientError`]; the [`TracksApi`] impl converts those into the core
/// `SyncError` taxonomy.
///
/// # Example
///
/// ```ignore
/// use tracklist_client::{ServerSettings, TracksClient};
///
/// let client = TracksClient::new(&ServerSettings::new("http://localhost:8000"))?;
/// let genres = client.list_genres().await?;
/// ```
#[derive(Debug, Clone)]
pub struct TracksClient {
    http: Client,
    base_url: Url,
}

impl TracksClient {
    /// Create a new client with the given server settings.
    pub fn new(settings: &ServerSettings) -> Result<Self> {
        let raw = settings.base_url.trim();
        if raw.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let trimmed = raw.trim_end_matches('/');
        if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let base_url =
            Url::parse(trimmed).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", raw, e)))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
            .user_agent(format!("Tracklist/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base_url })
    }

    /// The normalized base URL (no trailing slash in the path).
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// URL the audio collaborator should load for a track, if it has a file.
    pub fn audio_url(&self, track: &Track) -> Option<Url> {
        let file = track.audio_file.as_deref().filter(|f| !f.is_empty())?;
        self.endpoint(&["api", "files", file]).ok()
    }

    /// Fetch one page of tracks.
    pub async fn list_tracks(&self, query: &QueryParams, limit: u32) -> Result<TrackPage> {
        let url = self.endpoint(&["api", "tracks"])?;
        let pairs = query.to_query_pairs(limit);
        debug!(url = %url, page = query.page, search = %query.search, "Fetching tracks");

        let response = self
            .http
            .get(url)
            .query(&pairs)
            .send()
            .await
            .map_err(ClientError::transport)?;

        let page: TrackPage = read_json(ok_or_error(response, None).await?, "track list").await?;

        debug!(
            tracks = page.data.len(),
            total = page.meta.total,
            total_pages = page.meta.total_pages,
            "Fetched tracks"
        );

        Ok(page)
    }

    /// Create a track.
    pub async fn create_track(&self, draft: &TrackDraft) -> Result<Track> {
        let url = self.endpoint(&["api", "tracks"])?;
        debug!(url = %url, title = %draft.title, "Creating track");

        let response = self
            .http
            .post(url)
            .json(draft)
            .send()
            .await
            .map_err(ClientError::transport)?;

        let track: Track = read_json(ok_or_error(response, None).await?, "create").await?;
        info!(track_id = %track.id, title = %track.title, "Track created");
        Ok(track)
    }

    /// Replace a track's metadata.
    pub async fn update_track(&self, id: &TrackId, draft: &TrackDraft) -> Result<Track> {
        let server_id = server_id(id)?;
        let url = self.endpoint(&["api", "tracks", server_id])?;
        debug!(url = %url, track_id = %server_id, "Updating track");

        let response = self
            .http
            .put(url)
            .json(draft)
            .send()
            .await
            .map_err(ClientError::transport)?;

        let track: Track =
            read_json(ok_or_error(response, Some(server_id)).await?, "update").await?;
        info!(track_id = %track.id, "Track updated");
        Ok(track)
    }

    /// Delete a track.
    pub async fn delete_track(&self, id: &TrackId) -> Result<()> {
        let server_id = server_id(id)?;
        let url = self.endpoint(&["api", "tracks", server_id])?;
        debug!(url = %url, track_id = %server_id, "Deleting track");

        let response = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(ClientError::transport)?;

        ok_or_error(response, Some(server_id)).await?;
        info!(track_id = %server_id, "Track deleted");
        Ok(())
    }

    /// Delete several tracks in one request.
    pub async fn delete_tracks(&self, ids: &[TrackId]) -> Result<BulkDeleteResult> {
        let ids = ids.iter().map(server_id).collect::<Result<Vec<_>>>()?;
        let url = self.endpoint(&["api", "tracks", "delete"])?;
        debug!(url = %url, count = ids.len(), "Bulk deleting tracks");

        let response = self
            .http
            .post(url)
            .json(&BulkDeleteRequest { ids })
            .send()
            .await
            .map_err(ClientError::transport)?;

        let result: BulkDeleteResult =
            read_json(ok_or_error(response, None).await?, "bulk delete").await?;

        info!(
            succeeded = result.success.len(),
            failed = result.failed.len(),
            "Bulk delete finished"
        );
        Ok(result)
    }

    /// Upload (or replace) the audio file of a track.
    pub async fn upload_audio(&self, id: &TrackId, upload: &AudioUpload) -> Result<Track> {
        let server_id = server_id(id)?;
        let url = self.endpoint(&["api", "tracks", server_id, "upload"])?;
        debug!(url = %url, track_id = %server_id, file = %upload.file_name, "Uploading audio");

        let part = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.mime_type)?;
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(ClientError::transport)?;

        if response.status().as_u16() == 413 {
            return Err(ClientError::Validation {
                message: "File too large".to_string(),
                fields: Default::default(),
            });
        }

        let track: Track =
            read_json(ok_or_error(response, Some(server_id)).await?, "upload").await?;

        info!(
            track_id = %track.id,
            file = %upload.file_name,
            size = upload.len(),
            "Audio uploaded"
        );
        Ok(track)
    }

    /// Remove the audio file of a track.
    pub async fn delete_audio(&self, id: &TrackId) -> Result<Track> {
        let server_id = server_id(id)?;
        let url = self.endpoint(&["api", "tracks", server_id, "file"])?;
        debug!(url = %url, track_id = %server_id, "Deleting audio file");

        let response = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(ClientError::transport)?;

        let track: Track =
            read_json(ok_or_error(response, Some(server_id)).await?, "delete file").await?;
        info!(track_id = %track.id, "Audio file deleted");
        Ok(track)
    }

    /// List the selectable genres.
    pub async fn list_genres(&self) -> Result<Vec<String>> {
        let url = self.endpoint(&["api", "genres"])?;
        debug!(url = %url, "Fetching genres");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(ClientError::transport)?;

        let genres: Vec<String> = read_json(ok_or_error(response, None).await?, "genres").await?;
        debug!(count = genres.len(), "Fetched genres");
        Ok(genres)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl TracksApi for TracksClient {
    async fn list_tracks(
        &self,
        query: &QueryParams,
        limit: u32,
    ) -> tracklist_core::Result<TrackPage> {
        Ok(TracksClient::list_tracks(self, query, limit).await?)
    }

    async fn create_track(&self, draft: &TrackDraft) -> tracklist_core::Result<Track> {
        Ok(TracksClient::create_track(self, draft).await?)
    }

    async fn update_track(
        &self,
        id: &TrackId,
        draft: &TrackDraft,
    ) -> tracklist_core::Result<Track> {
        Ok(TracksClient::update_track(self, id, draft).await?)
    }

    async fn delete_track(&self, id: &TrackId) -> tracklist_core::Result<()> {
        Ok(TracksClient::delete_track(self, id).await?)
    }

    async fn delete_tracks(&self, ids: &[TrackId]) -> tracklist_core::Result<BulkDeleteResult> {
        Ok(TracksClient::delete_tracks(self, ids).await?)
    }

    async fn upload_audio(
        &self,
        id: &TrackId,
        upload: &AudioUpload,
    ) -> tracklist_core::Result<Track> {
        Ok(TracksClient::upload_audio(self, id, upload).await?)
    }

    async fn delete_audio(&self, id: &TrackId) -> tracklist_core::Result<Track> {
        Ok(TracksClient::delete_audio(self, id).await?)
    }

    async fn list_genres(&self) -> tracklist_core::Result<Vec<String>> {
        Ok(TracksClient::list_genres(self).await?)
    }
}

fn server_id(id: &TrackId) -> Result<&str> {
    id.server_id().ok_or_else(|| {
        ClientError::InvalidRequest(format!("track {} has not been saved to the server yet", id))
    })
}

async fn ok_or_error(response: Response, id: Option<&str>) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();

    Err(match status {
        400 | 422 => {
            let body: ApiErrorBody = serde_json::from_str(&text).unwrap_or_default();
            let fallback = if text.is_empty() {
                "Request rejected by server"
            } else {
                text.as_str()
            };
            ClientError::Validation {
                message: body.summary(fallback),
                fields: body.field_messages(),
            }
        }
        404 => ClientError::NotFound(id.map_or(text, str::to_string)),
        _ => ClientError::ServerError {
            status,
            message: text,
        },
    })
}

async fn read_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    response
        .json()
        .await
        .map_err(|e| ClientError::ParseError(format!("Failed to parse {} response: {}", what, e)))
}
