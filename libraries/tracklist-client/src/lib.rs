//! Tracklist Client
//!
//! HTTP client library for the tracks REST backend.
//!
//! # Features
//!
//! - **Listing**: paginated, filtered, sorted track pages
//! - **Mutations**: create, update, delete and bulk delete tracks
//! - **Audio files**: upload, replace and delete the file attached to a track
//! - **Genres**: the catalog of selectable genres
//!
//! `TracksClient` implements `tracklist_core::TracksApi`, so it plugs straight
//! into the sync layer.
//!
//! # Example
//!
//! ```ignore
//! use tracklist_client::{ClientConfig, TracksClient};
//! use tracklist_core::QueryParams;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::load()?;
//!     let client = TracksClient::new(&config.server)?;
//!
//!     let page = client.list_tracks(&QueryParams::default(), 10).await?;
//!     println!("{} of {} tracks", page.data.len(), page.meta.total);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod types;

pub use client::TracksClient;
pub use config::{
    ClientConfig, ConfigError, LibrarySettings, ServerSettings, UiSettings, UploadSettings,
    CONFIG_FILE_NAME, ENV_PREFIX,
};
pub use error::{ClientError, Result};
pub use types::ApiErrorBody;
