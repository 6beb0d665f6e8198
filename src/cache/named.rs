//! A single named cache with lazily expiring entries.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::{CacheError, Clock, Diagnostics, Entry, Lookup};

/// One named key-value collection.
///
/// This cache is:
/// - Thread-safe, guarded by its own reader/writer lock
/// - Lazily expiring (stale entries are evicted when next read)
/// - Clone-friendly (cloning is cheap, shares the same entries)
pub struct NamedCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    entries: Arc<RwLock<HashMap<String, Entry<V>>>>,
    name: Arc<str>,
    clock: Arc<dyn Clock>,
    diagnostics: Arc<Diagnostics>,
}

// Clones are handles onto the same entries
impl<V> Clone for NamedCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            name: Arc::clone(&self.name),
            clock: Arc::clone(&self.clock),
            diagnostics: Arc::clone(&self.diagnostics),
        }
    }
}

impl<V> NamedCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Create an empty cache reading time from `clock`.
    pub fn new(
        name: impl Into<Arc<str>>,
        clock: Arc<dyn Clock>,
        diagnostics: Arc<Diagnostics>,
    ) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            name: name.into(),
            clock,
            diagnostics,
        }
    }

    /// Get the name of this cache.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Insert or overwrite `key`, expiring `ttl_seconds` from now.
    ///
    /// The previous entry, expired or not, is replaced wholesale.
    pub fn put(&self, key: impl Into<String>, value: V, ttl_seconds: i64) {
        let key = key.into();
        self.diagnostics
            .trace(format_args!("put {} into cache {}", key, self.name));

        let entry = Entry::new(value, self.clock.now(), ttl_seconds);
        self.diagnostics
            .trace(format_args!("waiting to write-lock cache {}", self.name));
        self.entries.write().insert(key, entry);
    }

    /// Read `key`, evicting it if it has expired.
    pub fn get(&self, key: &str) -> Lookup<V> {
        self.diagnostics
            .trace(format_args!("get {} from cache {}", key, self.name));
        self.diagnostics
            .trace(format_args!("waiting to read-lock cache {}", self.name));

        let now = self.clock.now();
        let found = self.entries.read().get(key).cloned();

        let stale = match found {
            None => {
                self.diagnostics.key_miss(&self.name, key);
                return Lookup::KeyNotFound;
            }
            Some(entry) if !entry.is_expired_at(now) => {
                self.diagnostics
                    .hit(&self.name, key, entry.expires_in(now));
                return Lookup::Hit(entry.value);
            }
            Some(entry) => entry,
        };

        self.diagnostics.trace(format_args!(
            "entry {} in cache {} has expired, waiting to write-lock",
            key, self.name
        ));
        self.evict_expired(key, now, stale)
    }

    /// Second half of `get`, run after the shared lock is released.
    ///
    /// Another caller may have evicted or replaced the entry in the
    /// meantime: a fresh replacement is returned as a hit, a missing one
    /// reports `stale` as expired.
    fn evict_expired(&self, key: &str, now: i64, stale: Entry<V>) -> Lookup<V> {
        let mut entries = self.entries.write();
        if let Some(entry) = entries.get(key).filter(|e| !e.is_expired_at(now)) {
            let entry = entry.clone();
            drop(entries);
            self.diagnostics
                .hit(&self.name, key, entry.expires_in(now));
            return Lookup::Hit(entry.value);
        }
        let removed = entries.remove(key);
        drop(entries);

        if removed.is_some() {
            self.diagnostics
                .trace(format_args!("cleared expired entry {} in cache {}", key, self.name));
        }
        let expired = removed.unwrap_or(stale);
        self.diagnostics
            .expired(&self.name, key, now, expired.expires_at);
        Lookup::Expired(expired.value)
    }

    /// Remove `key`. Fails if it is not present.
    ///
    /// Expired-but-unread entries are still present and can be removed.
    pub fn invalidate(&self, key: &str) -> Result<(), CacheError> {
        self.diagnostics
            .trace(format_args!("invalidate {} in cache {}", key, self.name));

        let removed = self.entries.write().remove(key);
        match removed {
            Some(_) => {
                self.diagnostics
                    .trace(format_args!("entry {} in cache {} deleted", key, self.name));
                Ok(())
            }
            None => {
                self.diagnostics
                    .trace(format_args!("no entry {} in cache {}", key, self.name));
                Err(CacheError::key_not_found(&self.name, key))
            }
        }
    }

    /// Number of stored entries, including expired ones not yet read.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Whether both handles point at the same underlying cache.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }
}

impl<V> std::fmt::Debug for NamedCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamedCache")
            .field("name", &self.name)
            .field("entry_count", &self.len())
            .finish()
    }
}
