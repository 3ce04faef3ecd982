//! Genre catalog

use crate::error::SyncError;

/// Genres the server accepts, fetched once and reused by the forms
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreCatalog {
    genres: Vec<String>,
    loading: bool,
    loaded: bool,
    error: Option<SyncError>,
}

impl GenreCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Apply the result of a load; a failure keeps the previous list
    pub fn complete_load(&mut self, result: Result<Vec<String>, SyncError>) {
        self.loading = false;
        match result {
            Ok(mut genres) => {
                genres.retain(|g| !g.trim().is_empty());
                genres.dedup();
                self.genres = genres;
                self.loaded = true;
            }
            Err(err) => self.error = Some(err),
        }
    }

    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    /// The list to validate drafts against, if one has been loaded
    pub fn known(&self) -> Option<&[String]> {
        self.loaded.then_some(self.genres.as_slice())
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn error(&self) -> Option<&SyncError> {
        self.error.as_ref()
    }
}
