//! Repository cache error types.

use thiserror::Error;

/// Errors that can occur while reading or writing the repository cache.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Failed to read or write the cache file.
    #[error("Failed to access cache file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The cache file is not valid.
    #[error("Cache file '{path}' is corrupt: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
