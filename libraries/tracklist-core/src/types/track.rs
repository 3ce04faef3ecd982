//! Track types

use super::ids::TrackId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A track as held by the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub artist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    /// Storage key of the attached audio file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_file: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Track {
    /// Build a placeholder track for an optimistic insert.
    ///
    /// The draft is expected to be validated already.
    pub fn provisional(id: TrackId, draft: &TrackDraft) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: draft.title.clone(),
            artist: draft.artist.clone(),
            album: draft.album.clone(),
            genres: draft.genres.clone(),
            slug: None,
            cover_image: draft.cover_image.clone(),
            audio_file: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether an audio file is attached
    pub fn has_audio(&self) -> bool {
        self.audio_file.as_deref().is_some_and(|f| !f.is_empty())
    }
}

/// Form data for creating or editing a track
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackDraft {
    pub title: String,
    pub artist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    pub genres: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

impl TrackDraft {
    /// Draft with the two required text fields and one genre
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        genre: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            album: None,
            genres: vec![genre.into()],
            cover_image: None,
        }
    }

    /// Prefill a draft from an existing track (edit form)
    pub fn from_track(track: &Track) -> Self {
        Self {
            title: track.title.clone(),
            artist: track.artist.clone(),
            album: track.album.clone(),
            genres: track.genres.clone(),
            cover_image: track.cover_image.clone(),
        }
    }
}
