//! Result of reading from a cache.

use super::CacheError;

/// Which way a lookup went, without the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Hit,
    CacheNotFound,
    KeyNotFound,
    Expired,
}

/// What a `get` found.
///
/// `Expired` carries the evicted value for diagnostics only. It is not a
/// usable result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<V> {
    Hit(V),
    CacheNotFound,
    KeyNotFound,
    Expired(V),
}

impl<V> Lookup<V> {
    pub fn outcome(&self) -> Outcome {
        match self {
            Self::Hit(_) => Outcome::Hit,
            Self::CacheNotFound => Outcome::CacheNotFound,
            Self::KeyNotFound => Outcome::KeyNotFound,
            Self::Expired(_) => Outcome::Expired,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit(_))
    }

    /// The value, only on a hit.
    pub fn hit(self) -> Option<V> {
        match self {
            Self::Hit(value) => Some(value),
            _ => None,
        }
    }

    /// Convert into the error taxonomy, naming the cache and key looked up.
    pub fn into_result(self, cache: &str, key: &str) -> Result<V, CacheError> {
        match self {
            Self::Hit(value) => Ok(value),
            Self::CacheNotFound => Err(CacheError::cache_not_found(cache)),
            Self::KeyNotFound => Err(CacheError::key_not_found(cache, key)),
            Self::Expired(_) => Err(CacheError::expired(cache, key)),
        }
    }
}
