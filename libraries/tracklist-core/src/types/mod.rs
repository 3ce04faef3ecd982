mod ids;
mod page;
mod query;
mod track;
mod upload;

pub use ids::TrackId;
pub use page::{BulkDeleteResult, PageMeta, TrackPage};
pub use query::{QueryParams, SortField, SortOrder};
pub use track::{Track, TrackDraft};
pub use upload::{AudioUpload, DEFAULT_MAX_UPLOAD_BYTES};
