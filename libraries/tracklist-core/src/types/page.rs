/// Pagination types for list responses
use super::ids::TrackId;
use super::track::Track;
use serde::{Deserialize, Serialize};

/// Server-reported pagination summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl Default for PageMeta {
    fn default() -> Self {
        Self {
            total: 0,
            page: 1,
            limit: 10,
            total_pages: 0,
        }
    }
}

impl PageMeta {
    /// Whether a page after this one exists
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Whether a page before this one exists
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// One page of tracks as returned by the list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackPage {
    pub data: Vec<Track>,
    pub meta: PageMeta,
}

/// Partition reported by the bulk delete endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkDeleteResult {
    #[serde(default)]
    pub success: Vec<TrackId>,
    #[serde(default)]
    pub failed: Vec<TrackId>,
}
