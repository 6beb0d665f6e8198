//! Stored value with its expiry timestamp.

/// A cached value and the unix second after which it is stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<V> {
    pub value: V,
    pub expires_at: i64,
}

impl<V> Entry<V> {
    /// Build an entry that lives `ttl_seconds` past `now`.
    ///
    /// Zero or negative TTLs are allowed.
    pub fn new(value: V, now: i64, ttl_seconds: i64) -> Self {
        Self {
            value,
            expires_at: now.saturating_add(ttl_seconds),
        }
    }

    /// An entry expiring exactly at `now` is still valid.
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at < now
    }

    /// Seconds left before expiry, negative once stale.
    pub fn expires_in(&self, now: i64) -> i64 {
        self.expires_at.saturating_sub(now)
    }
}
