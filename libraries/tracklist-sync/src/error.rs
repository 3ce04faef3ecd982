//! Error types for sync operations
//!
//! The sync layer reports failures with the core taxonomy unchanged, so
//! callers match on one enum regardless of which layer failed.

pub use tracklist_core::error::{Result, SyncError};
