//! Tracklist Core
//!
//! Platform-agnostic types, traits, and error handling for the Tracklist client.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `TrackId`, `QueryParams`, `PageMeta`, `TrackDraft`
//! - **Core Traits**: `TracksApi`, the seam between the sync layer and the REST backend
//! - **Error Handling**: Unified `SyncError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use tracklist_core::types::{QueryParams, SortField, SortOrder, TrackId};
//!
//! let query = QueryParams {
//!     search: "night".to_string(),
//!     sort: SortField::CreatedAt,
//!     order: SortOrder::Desc,
//!     ..QueryParams::default()
//! };
//! let pairs = query.to_query_pairs(10);
//! assert!(pairs.contains(&("search", "night".to_string())));
//!
//! // Provisional ids never collide with server ids
//! let provisional = TrackId::provisional();
//! assert_ne!(provisional, TrackId::new("42"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use error::{Result, SyncError};
pub use traits::TracksApi;

pub use types::{
    AudioUpload, BulkDeleteResult, PageMeta, QueryParams, SortField, SortOrder, Track, TrackDraft,
    TrackId, TrackPage,
};
