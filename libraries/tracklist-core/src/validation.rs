//! Client-side input validation.
//!
//! Rejections here never reach the network; they surface as
//! `SyncError::InvalidInput`.

use crate::error::{Result, SyncError};
use crate::types::{AudioUpload, TrackDraft};
use url::Url;

/// MIME types accepted for audio uploads
pub const ALLOWED_AUDIO_TYPES: [&str; 3] = ["audio/mpeg", "audio/wav", "audio/x-wav"];

/// Validate and normalize a track draft.
///
/// Trims text fields, turns blank `album`/`cover_image` into `None` and
/// drops duplicate genres while keeping their order. When `known_genres` is
/// given, every genre must be one of them.
pub fn validate_draft(draft: &TrackDraft, known_genres: Option<&[String]>) -> Result<TrackDraft> {
    let mut problems = Vec::new();

    let title = draft.title.trim().to_string();
    if title.is_empty() {
        problems.push("title: Title is required".to_string());
    }

    let artist = draft.artist.trim().to_string();
    if artist.is_empty() {
        problems.push("artist: Artist is required".to_string());
    }

    let mut genres: Vec<String> = Vec::with_capacity(draft.genres.len());
    for genre in draft.genres.iter().map(|g| g.trim()).filter(|g| !g.is_empty()) {
        if !genres.iter().any(|g| g == genre) {
            genres.push(genre.to_string());
        }
    }
    if genres.is_empty() {
        problems.push("genres: At least one genre is required".to_string());
    } else if let Some(known) = known_genres {
        for genre in genres.iter().filter(|g| !known.contains(g)) {
            problems.push(format!("genres: Unknown genre '{}'", genre));
        }
    }

    let album = non_blank(draft.album.as_deref());

    let cover_image = non_blank(draft.cover_image.as_deref());
    if let Some(cover) = cover_image.as_deref() {
        let valid = Url::parse(cover)
            .map(|u| matches!(u.scheme(), "http" | "https"))
            .unwrap_or(false);
        if !valid {
            problems.push("coverImage: Cover image must be a valid URL".to_string());
        }
    }

    if !problems.is_empty() {
        return Err(SyncError::invalid_input(problems.join("; ")));
    }

    Ok(TrackDraft {
        title,
        artist,
        album,
        genres,
        cover_image,
    })
}

/// Check an audio upload against the accepted types and the size cap.
pub fn validate_upload(upload: &AudioUpload, max_bytes: u64) -> Result<()> {
    if !ALLOWED_AUDIO_TYPES.contains(&upload.mime_type.as_str()) {
        return Err(SyncError::invalid_input(
            "Only .mp3 and .wav files are allowed",
        ));
    }
    if upload.is_empty() {
        return Err(SyncError::invalid_input("Audio file is empty"));
    }
    if upload.len() > max_bytes {
        return Err(SyncError::invalid_input(format!(
            "File size must be {} or less",
            format_size(max_bytes)
        )));
    }
    Ok(())
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn format_size(bytes: u64) -> String {
    const MIB: u64 = 1024 * 1024;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else {
        format!("{} bytes", bytes)
    }
}
