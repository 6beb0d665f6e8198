//! Cache registry - Central management for all named caches.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::{CacheError, Clock, Diagnostics, LogLevel, Lookup, NamedCache, SystemClock};

/// Central registry mapping cache names to caches.
///
/// Caches are created lazily the first time something is `put` into
/// them. The registry lock is only held to resolve a name; reads and
/// writes of entries go through the cache's own lock.
///
/// ## Example
///
/// ```rust
/// use stash::{CacheRegistry, Lookup};
///
/// let registry = CacheRegistry::new();
/// registry.put("users", "42", "alice".to_string(), 60);
///
/// assert_eq!(registry.get("users", "42"), Lookup::Hit("alice".to_string()));
/// assert_eq!(registry.get("groups", "1"), Lookup::CacheNotFound);
/// ```
pub struct CacheRegistry<V>
where
    V: Clone + Send + Sync + 'static,
{
    caches: Arc<RwLock<HashMap<String, NamedCache<V>>>>,
    clock: Arc<dyn Clock>,
    diagnostics: Arc<Diagnostics>,
}

impl<V> Clone for CacheRegistry<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            caches: Arc::clone(&self.caches),
            clock: Arc::clone(&self.clock),
            diagnostics: Arc::clone(&self.diagnostics),
        }
    }
}

impl<V> CacheRegistry<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Create a new empty registry on the wall clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a new empty registry reading time from `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            caches: Arc::new(RwLock::new(HashMap::new())),
            clock,
            diagnostics: Arc::new(Diagnostics::default()),
        }
    }

    /// Set the diagnostic level for this registry and all of its caches.
    pub fn set_log_level(&self, level: LogLevel) {
        self.diagnostics.set_level(level);
    }

    pub fn log_level(&self) -> LogLevel {
        self.diagnostics.level()
    }

    /// Get an existing cache by name.
    ///
    /// Returns `None` if the cache doesn't exist. Never creates one.
    pub fn cache(&self, name: &str) -> Option<NamedCache<V>> {
        self.caches.read().get(name).cloned()
    }

    /// Get an existing cache or create a new one if it doesn't exist.
    ///
    /// Concurrent first accesses to the same name all receive the same
    /// cache: the existence check is repeated under the write lock.
    pub fn get_or_create(&self, name: &str) -> NamedCache<V> {
        if let Some(cache) = self.cache(name) {
            return cache;
        }

        let mut caches = self.caches.write();
        caches
            .entry(name.to_string())
            .or_insert_with(|| {
                self.diagnostics
                    .trace(format_args!("creating cache {}", name));
                NamedCache::new(name, Arc::clone(&self.clock), Arc::clone(&self.diagnostics))
            })
            .clone()
    }

    /// Store `value` under `key` in cache `name`, creating the cache if needed.
    pub fn put(&self, name: &str, key: impl Into<String>, value: V, ttl_seconds: i64) {
        // The registry lock is released before the cache lock is taken
        let cache = self.get_or_create(name);
        cache.put(key, value, ttl_seconds);
    }

    /// Look up `key` in cache `name`.
    pub fn get(&self, name: &str, key: &str) -> Lookup<V> {
        match self.cache(name) {
            Some(cache) => cache.get(key),
            None => {
                self.diagnostics
                    .trace(format_args!("no cache called {}", name));
                self.diagnostics.cache_miss(name, key);
                Lookup::CacheNotFound
            }
        }
    }

    /// Like [`get`](Self::get), but anything other than a hit is an error.
    pub fn try_get(&self, name: &str, key: &str) -> Result<V, CacheError> {
        self.get(name, key).into_result(name, key)
    }

    /// Remove `key` from cache `name`.
    pub fn invalidate(&self, name: &str, key: &str) -> Result<(), CacheError> {
        let cache = self.cache(name).ok_or_else(|| {
            self.diagnostics
                .trace(format_args!("no cache called {}", name));
            CacheError::cache_not_found(name)
        })?;
        cache.invalidate(key)
    }

    /// Remove a cache from the registry.
    ///
    /// Handles obtained before the purge stay usable but are no longer
    /// reachable by name. Returns `true` if a cache was removed.
    pub fn purge(&self, name: &str) -> bool {
        let removed = self.caches.write().remove(name).is_some();
        self.diagnostics
            .trace(format_args!("purge {} (removed: {})", name, removed));
        removed
    }

    /// Remove every cache from the registry.
    pub fn purge_all(&self) {
        let count = {
            let mut caches = self.caches.write();
            let count = caches.len();
            caches.clear();
            count
        };
        self.diagnostics
            .trace(format_args!("purge all ({} caches removed)", count));
    }

    /// Whether `name` currently resolves to a cache.
    ///
    /// False after a purge, even while detached handles are still in use.
    pub fn contains(&self, name: &str) -> bool {
        self.caches.read().contains_key(name)
    }

    /// Number of names that resolve to a cache. Detached handles don't count.
    pub fn len(&self) -> usize {
        self.caches.read().len()
    }

    /// True before the first `put` and after `purge_all`.
    pub fn is_empty(&self) -> bool {
        self.caches.read().is_empty()
    }

    /// Names that currently resolve to a cache, sorted.
    pub fn cache_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.caches.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl<V> Default for CacheRegistry<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> std::fmt::Debug for CacheRegistry<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheRegistry")
            .field("caches", &self.cache_names())
            .field("log_level", &self.diagnostics.level())
            .finish()
    }
}
