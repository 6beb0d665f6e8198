//! Cache error types.

use thiserror::Error;

/// Errors returned by cache lookups and invalidation.
///
/// All variants are ordinary outcomes. Nothing is retried internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// No cache is registered under this name (never created, or purged).
    #[error("no cache named '{cache}'")]
    CacheNotFound { cache: String },

    /// The cache exists but holds no entry for this key.
    #[error("no entry '{key}' in cache '{cache}'")]
    KeyNotFound { cache: String, key: String },

    /// The entry was present but past its expiry; it has been evicted.
    #[error("entry '{key}' in cache '{cache}' has expired")]
    Expired { cache: String, key: String },
}

impl CacheError {
    pub(crate) fn cache_not_found(cache: &str) -> Self {
        Self::CacheNotFound {
            cache: cache.to_string(),
        }
    }

    pub(crate) fn key_not_found(cache: &str, key: &str) -> Self {
        Self::KeyNotFound {
            cache: cache.to_string(),
            key: key.to_string(),
        }
    }

    pub(crate) fn expired(cache: &str, key: &str) -> Self {
        Self::Expired {
            cache: cache.to_string(),
            key: key.to_string(),
        }
    }
}
