//! Tunables for mention completion, loadable from TOML.
//!
//! ```toml
//! api_base_url = "https://wiki.example.com"
//! debounce_ms = 150
//! max_results = 10
//! min_query_chars = 0
//! search_timeout_ms = 3000
//! ```

use std::io;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use wiki_user_search::UserSearchClient;

pub const DEFAULT_DEBOUNCE_MS: u64 = 150;
pub const DEFAULT_MAX_RESULTS: usize = wiki_user_search::DEFAULT_SEARCH_LIMIT;
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io { path: String, source: io::Error },

    #[error(transparent)]
    Parse(#[from] toml::de::Error),
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct MentionConfig {
    /// Wiki server hosting `/api/users/search`.
    pub api_base_url: String,

    /// Quiet period after the last keystroke before a non-empty query is
    /// looked up.
    pub debounce_ms: u64,

    /// Upper bound on suggestions requested and shown.
    pub max_results: usize,

    /// Shortest query that opens the list. `0` lets a bare `@` browse all
    /// users; `2` matches servers that refuse shorter searches.
    pub min_query_chars: usize,

    /// Abort searches that take longer than this. `None` waits indefinitely.
    pub search_timeout_ms: Option<u64>,
}

impl Default for MentionConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            max_results: DEFAULT_MAX_RESULTS,
            min_query_chars: 0,
            search_timeout_ms: None,
        }
    }
}

impl MentionConfig {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("{} not found; using default mention config", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn search_timeout(&self) -> Option<Duration> {
        self.search_timeout_ms.map(Duration::from_millis)
    }

    /// HTTP search client pointed at `api_base_url`.
    pub fn search_client(&self) -> UserSearchClient {
        UserSearchClient::new(self.api_base_url.clone(), self.search_timeout())
    }
}
