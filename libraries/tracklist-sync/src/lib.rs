//! Tracklist - Query and Optimistic Sync
//!
//! Keeps a local page of tracks consistent with a paginated, filtered,
//! sorted, server-backed collection while the user edits it.
//!
//! This crate provides:
//! - Debounced input (`Debouncer`)
//! - Query state with page reset on filter changes (`QueryState`)
//! - A reducer-style collection store with stale-response guarding
//!   (`CollectionStore`)
//! - Optimistic insert/delete with confirm-or-revert reconciliation
//! - Bulk selection (`Selection`)
//! - Single-player playback coordination (`PlaybackCoordinator`, `TrackPlayer`)
//! - The async `TracksController` wiring all of it to a `TracksApi`
//!
//! # Architecture
//!
//! `tracklist-sync` never talks HTTP itself. All server access goes through
//! `tracklist_core::TracksApi`; every state change is a synchronous
//! transition on `CollectionStore` applied after an awaited call resolves.
//!
//! # Example: Query State
//!
//! ```rust
//! use tracklist_sync::QueryState;
//! use tracklist_core::SortField;
//!
//! let mut query = QueryState::default();
//! query.set_page(4);
//! query.set_sort(SortField::Artist);
//!
//! // Changing the sort invalidated the page position
//! assert_eq!(query.params().page, 1);
//! ```
//!
//! # Example: Optimistic Insert
//!
//! ```rust
//! use tracklist_sync::CollectionStore;
//! use tracklist_core::{Track, TrackDraft, TrackId};
//!
//! let mut store = CollectionStore::new();
//! let draft = TrackDraft::new("Title", "Artist", "Rock");
//!
//! let provisional = store.insert_provisional(&draft);
//! assert_eq!(store.tracks()[0].id, provisional);
//!
//! let confirmed = Track::provisional(TrackId::new("srv-1"), &draft);
//! store.confirm_provisional(&provisional, confirmed);
//! assert_eq!(store.tracks()[0].id, TrackId::new("srv-1"));
//! ```

mod controller;
mod debounce;
mod error;
mod genres;
mod optimistic;
mod pagination;
mod playback;
mod query;
mod selection;
mod store;

pub use controller::{BulkDeleteSummary, TracksController, UpdateOutcome};
pub use debounce::{Debouncer, DEFAULT_QUIET_PERIOD};
pub use error::{Result, SyncError};
pub use genres::GenreCatalog;
pub use optimistic::PendingRemoval;
pub use pagination::{page_window, PageButton};
pub use playback::{format_time, AudioOutput, PlaybackCoordinator, TrackPlayer};
pub use query::QueryState;
pub use selection::{Selection, SelectionMode};
pub use store::{distinct_artists, CollectionStore, FetchOutcome, FetchTicket};
