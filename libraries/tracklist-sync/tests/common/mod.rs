//! Shared fixtures for the sync integration tests
//!
//! `FakeApi` is an in-memory server of record. Individual operations can be
//! made to fail, and list requests for a given search string can be held
//! open until the test releases them.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use tokio::sync::oneshot;
use tracklist_core::{
    AudioUpload, BulkDeleteResult, PageMeta, QueryParams, Result, SyncError, Track, TrackDraft,
    TrackId, TrackPage, TracksApi,
};

/// Operation names accepted by [`FakeApi::fail`]
pub mod ops {
    pub const LIST: &str = "list";
    pub const CREATE: &str = "create";
    pub const UPDATE: &str = "update";
    pub const DELETE: &str = "delete";
    pub const BULK_DELETE: &str = "bulk_delete";
    pub const UPLOAD: &str = "upload";
    pub const DELETE_AUDIO: &str = "delete_audio";
    pub const GENRES: &str = "genres";
}

pub fn track(id: &str, title: &str, artist: &str) -> Track {
    Track::provisional(TrackId::new(id), &TrackDraft::new(title, artist, "Rock"))
}

#[derive(Default)]
struct State {
    tracks: Vec<Track>,
    genres: Vec<String>,
    failures: HashMap<&'static str, SyncError>,
    refused: HashSet<TrackId>,
    gates: HashMap<String, oneshot::Receiver<()>>,
    calls: Vec<&'static str>,
    next_id: u32,
}

#[derive(Default)]
pub struct FakeApi {
    state: Mutex<State>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tracks(tracks: Vec<Track>) -> Self {
        let api = Self::new();
        api.state.lock().unwrap().tracks = tracks;
        api
    }

    pub fn set_genres(&self, genres: &[&str]) {
        self.state.lock().unwrap().genres = genres.iter().map(|g| g.to_string()).collect();
    }

    /// Make every later call to `op` fail with `err`
    pub fn fail(&self, op: &'static str, err: SyncError) {
        self.state.lock().unwrap().failures.insert(op, err);
    }

    pub fn recover(&self, op: &'static str) {
        self.state.lock().unwrap().failures.remove(op);
    }

    /// Bulk delete reports `id` as failed
    pub fn refuse(&self, id: &str) {
        self.state.lock().unwrap().refused.insert(TrackId::new(id));
    }

    /// Hold the next list request for `search` until the sender fires
    pub fn gate(&self, search: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.state.lock().unwrap().gates.insert(search.to_string(), rx);
        tx
    }

    /// Gates whose list request has not arrived yet
    pub fn gates_pending(&self) -> usize {
        self.state.lock().unwrap().gates.len()
    }

    pub fn calls(&self, op: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| **c == op)
            .count()
    }

    pub fn server_ids(&self) -> Vec<TrackId> {
        self.state
            .lock()
            .unwrap()
            .tracks
            .iter()
            .map(|t| t.id.clone())
            .collect()
    }

    fn enter(&self, op: &'static str) -> Result<std::sync::MutexGuard<'_, State>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(op);
        if let Some(err) = state.failures.get(op).cloned() {
            return Err(err);
        }
        Ok(state)
    }
}

fn refuse_provisional(id: &TrackId) -> Result<&str> {
    id.server_id()
        .ok_or_else(|| SyncError::invalid_input(format!("{} has not been saved yet", id)))
}

#[async_trait]
impl TracksApi for FakeApi {
    async fn list_tracks(&self, query: &QueryParams, limit: u32) -> Result<TrackPage> {
        let gate = self.state.lock().unwrap().gates.remove(&query.search);
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        let state = self.enter(ops::LIST)?;
        let matching: Vec<&Track> = state
            .tracks
            .iter()
            .filter(|t| query.search.is_empty() || t.title.contains(&query.search))
            .filter(|t| query.artist.as_ref().map_or(true, |a| &t.artist == a))
            .collect();

        let limit = limit.max(1);
        let total = matching.len() as u32;
        let total_pages = total.div_ceil(limit);
        let data = matching
            .into_iter()
            .skip(((query.page.max(1) - 1) * limit) as usize)
            .take(limit as usize)
            .cloned()
            .collect();

        Ok(TrackPage {
            data,
            meta: PageMeta {
                total: u64::from(total),
                page: query.page,
                limit,
                total_pages,
            },
        })
    }

    async fn create_track(&self, draft: &TrackDraft) -> Result<Track> {
        let mut state = self.enter(ops::CREATE)?;
        state.next_id += 1;
        let track = Track::provisional(TrackId::new(format!("srv-{}", state.next_id)), draft);
        state.tracks.insert(0, track.clone());
        Ok(track)
    }

    async fn update_track(&self, id: &TrackId, draft: &TrackDraft) -> Result<Track> {
        let raw = refuse_provisional(id)?;
        let mut state = self.enter(ops::UPDATE)?;
        let existing = state
            .tracks
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| SyncError::not_found(raw))?;
        existing.title = draft.title.clone();
        existing.artist = draft.artist.clone();
        existing.album = draft.album.clone();
        existing.genres = draft.genres.clone();
        existing.cover_image = draft.cover_image.clone();
        Ok(existing.clone())
    }

    async fn delete_track(&self, id: &TrackId) -> Result<()> {
        let raw = refuse_provisional(id)?;
        let mut state = self.enter(ops::DELETE)?;
        let before = state.tracks.len();
        state.tracks.retain(|t| &t.id != id);
        if state.tracks.len() == before {
            return Err(SyncError::not_found(raw));
        }
        Ok(())
    }

    async fn delete_tracks(&self, ids: &[TrackId]) -> Result<BulkDeleteResult> {
        let mut state = self.enter(ops::BULK_DELETE)?;
        let mut result = BulkDeleteResult::default();
        for id in ids {
            let present = state.tracks.iter().any(|t| &t.id == id);
            if present && !state.refused.contains(id) {
                state.tracks.retain(|t| &t.id != id);
                result.success.push(id.clone());
            } else {
                result.failed.push(id.clone());
            }
        }
        Ok(result)
    }

    async fn upload_audio(&self, id: &TrackId, upload: &AudioUpload) -> Result<Track> {
        let raw = refuse_provisional(id)?.to_string();
        let mut state = self.enter(ops::UPLOAD)?;
        let existing = state
            .tracks
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| SyncError::not_found(raw.clone()))?;
        let extension = upload.file_name.rsplit('.').next().unwrap_or("mp3");
        existing.audio_file = Some(format!("{}.{}", raw, extension));
        Ok(existing.clone())
    }

    async fn delete_audio(&self, id: &TrackId) -> Result<Track> {
        let raw = refuse_provisional(id)?;
        let mut state = self.enter(ops::DELETE_AUDIO)?;
        let existing = state
            .tracks
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| SyncError::not_found(raw))?;
        existing.audio_file = None;
        Ok(existing.clone())
    }

    async fn list_genres(&self) -> Result<Vec<String>> {
        let state = self.enter(ops::GENRES)?;
        Ok(state.genres.clone())
    }
}
