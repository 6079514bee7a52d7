use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// Number of posts a provider generates when nothing else is configured.
pub const DEFAULT_INITIAL_POSTS: usize = 30;

/// How a [`PostProvider`](crate::PostProvider) seeds its store.
///
/// Every field is optional in TOML:
///
/// ```toml
/// initial_posts = 30
/// search_query = ""
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Posts generated at startup.
    pub initial_posts: usize,
    /// Query applied from the start. Empty means no filtering.
    pub search_query: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            initial_posts: DEFAULT_INITIAL_POSTS,
            search_query: String::new(),
        }
    }
}

impl ProviderConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), ?config, "loaded provider config");
        Ok(config)
    }
}
