use std::path::PathBuf;

/// Errors raised when reaching for the post store.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PostError {
    #[error("post store was used outside of a PostProvider")]
    UsedOutsideProvider,
}

/// Errors raised while loading a [`ProviderConfig`](crate::ProviderConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
