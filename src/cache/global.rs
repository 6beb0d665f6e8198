//! Process-wide registry for callers that cannot thread a handle through.
//!
//! Prefer passing a [`CacheRegistry`] explicitly. These functions are for
//! the outermost layer of a program.

use once_cell::sync::Lazy;
use serde_json::Value;

use super::{CacheError, CacheRegistry, LogLevel, Lookup};

static REGISTRY: Lazy<CacheRegistry<Value>> = Lazy::new(CacheRegistry::new);

/// The shared registry, created on first use and never torn down.
pub fn global() -> &'static CacheRegistry<Value> {
    &REGISTRY
}

pub fn put(cache: &str, key: impl Into<String>, value: Value, ttl_seconds: i64) {
    REGISTRY.put(cache, key, value, ttl_seconds);
}

pub fn get(cache: &str, key: &str) -> Lookup<Value> {
    REGISTRY.get(cache, key)
}

pub fn try_get(cache: &str, key: &str) -> Result<Value, CacheError> {
    REGISTRY.try_get(cache, key)
}

pub fn invalidate(cache: &str, key: &str) -> Result<(), CacheError> {
    REGISTRY.invalidate(cache, key)
}

pub fn purge(cache: &str) {
    REGISTRY.purge(cache);
}

pub fn purge_all() {
    REGISTRY.purge_all();
}

pub fn set_log_level(level: LogLevel) {
    REGISTRY.set_log_level(level);
}
