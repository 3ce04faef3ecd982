/// Query descriptor types for paginated track listing
use crate::error::SyncError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Field the server sorts by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    Title,
    Artist,
    Album,
    CreatedAt,
}

impl SortField {
    /// All sort fields, in the order a picker would show them
    pub const ALL: [SortField; 4] = [Self::Title, Self::Artist, Self::Album, Self::CreatedAt];

    /// Wire representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Artist => "artist",
            Self::Album => "album",
            Self::CreatedAt => "createdAt",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortField {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(Self::Title),
            "artist" => Ok(Self::Artist),
            "album" => Ok(Self::Album),
            "createdAt" | "created_at" | "created-at" => Ok(Self::CreatedAt),
            other => Err(SyncError::invalid_input(format!(
                "unknown sort field '{}'",
                other
            ))),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Wire representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// The opposite direction
    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(SyncError::invalid_input(format!(
                "unknown sort order '{}'",
                other
            ))),
        }
    }
}

/// Canonical request descriptor for one page of tracks.
///
/// `genre` and `artist` are `None` when unset; an empty string is never a
/// filter value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryParams {
    /// 1-based page number
    pub page: u32,
    pub search: String,
    pub sort: SortField,
    pub order: SortOrder,
    pub genre: Option<String>,
    pub artist: Option<String>,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            page: 1,
            search: String::new(),
            sort: SortField::default(),
            order: SortOrder::default(),
            genre: None,
            artist: None,
        }
    }
}

impl QueryParams {
    /// Same query, different page (clamped to 1)
    #[must_use]
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    /// URL query pairs for the list endpoint.
    ///
    /// Empty search and unset filters are omitted so the server applies no
    /// filter for them.
    pub fn to_query_pairs(&self, limit: u32) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.max(1).to_string()),
            ("limit", limit.to_string()),
            ("sort", self.sort.as_str().to_string()),
            ("order", self.order.as_str().to_string()),
        ];

        let search = self.search.trim();
        if !search.is_empty() {
            pairs.push(("search", search.to_string()));
        }
        if let Some(genre) = self.genre.as_deref().filter(|g| !g.is_empty()) {
            pairs.push(("genre", genre.to_string()));
        }
        if let Some(artist) = self.artist.as_deref().filter(|a| !a.is_empty()) {
            pairs.push(("artist", artist.to_string()));
        }

        pairs
    }
}
