/// Client configuration
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracklist_core::types::DEFAULT_MAX_UPLOAD_BYTES;

/// Default config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "tracklist.toml";

/// Prefix for environment overrides, e.g. `TRACKLIST_SERVER__BASE_URL`
pub const ENV_PREFIX: &str = "TRACKLIST";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub library: LibrarySettings,

    #[serde(default)]
    pub ui: UiSettings,

    #[serde(default)]
    pub upload: UploadSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibrarySettings {
    /// Page size for the paginated list
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,

    /// Page size used when walking every page to collect artists
    #[serde(default = "default_artist_scan_limit")]
    pub artist_scan_limit: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiSettings {
    /// Quiet period before search input is applied
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadSettings {
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,
}

impl ClientConfig {
    /// Load configuration from `tracklist.toml` (if present) and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from an explicit file (required to exist) or the
    /// default file (optional), then apply environment overrides.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(CONFIG_FILE_NAME);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (TRACKLIST_SECTION__KEY)
        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.server.base_url.trim();
        if url.is_empty() {
            return Err(ConfigError::Invalid(
                "server.base_url is required (set TRACKLIST_SERVER__BASE_URL)".to_string(),
            ));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "server.base_url must start with http:// or https:// (got {})",
                url
            )));
        }
        if self.library.page_limit == 0 || self.library.artist_scan_limit == 0 {
            return Err(ConfigError::Invalid(
                "library limits must be greater than zero".to_string(),
            ));
        }
        if self.upload.max_bytes == 0 {
            return Err(ConfigError::Invalid(
                "upload.max_bytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

// Default values
fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_page_limit() -> u32 {
    10
}

fn default_artist_scan_limit() -> u32 {
    100
}

fn default_debounce_ms() -> u64 {
    400
}

fn default_max_bytes() -> u64 {
    DEFAULT_MAX_UPLOAD_BYTES
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl ServerSettings {
    /// Settings pointing at `base_url` with default timeouts
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            page_limit: default_page_limit(),
            artist_scan_limit: default_artist_scan_limit(),
        }
    }
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
        }
    }
}
