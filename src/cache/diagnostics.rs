//! Diagnostic side channel for cache activity.
//!
//! The level only decides which `tracing` events are emitted. Cache
//! behaviour is identical at every level.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

/// How chatty the caches are.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "u8")]
#[repr(u8)]
pub enum LogLevel {
    /// Nothing is reported.
    #[default]
    Silent = 0,
    /// Hits, misses and expirations.
    Events = 1,
    /// Events plus a trace of every operation.
    Trace = 2,
}

/// Raised when a log level outside `0..=2` is requested.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid cache log level '{0}' (expected 0, 1 or 2)")]
pub struct InvalidLogLevel(pub String);

impl TryFrom<u8> for LogLevel {
    type Error = InvalidLogLevel;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Silent),
            1 => Ok(Self::Events),
            2 => Ok(Self::Trace),
            other => Err(InvalidLogLevel(other.to_string())),
        }
    }
}

impl FromStr for LogLevel {
    type Err = InvalidLogLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        s.parse::<u8>()
            .map_err(|_| InvalidLogLevel(s.to_string()))
            .and_then(Self::try_from)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8)
    }
}

/// Shared level plus the event emitters the caches call into.
#[derive(Debug, Default)]
pub struct Diagnostics {
    level: AtomicU8,
}

impl Diagnostics {
    pub fn new(level: LogLevel) -> Self {
        Self {
            level: AtomicU8::new(level as u8),
        }
    }

    pub fn level(&self) -> LogLevel {
        LogLevel::try_from(self.level.load(Ordering::Relaxed)).unwrap_or_default()
    }

    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level as u8, Ordering::Relaxed);
    }

    fn reports_events(&self) -> bool {
        self.level() >= LogLevel::Events
    }

    fn traces(&self) -> bool {
        self.level() >= LogLevel::Trace
    }

    /// Per-operation trace, emitted at [`LogLevel::Trace`].
    pub(crate) fn trace(&self, args: fmt::Arguments<'_>) {
        if self.traces() {
            debug!("{}", args);
        }
    }

    pub(crate) fn hit(&self, cache: &str, key: &str, expires_in: i64) {
        if self.reports_events() {
            info!(cache, key, expires_in, "cache hit");
        }
    }

    pub(crate) fn cache_miss(&self, cache: &str, key: &str) {
        if self.reports_events() {
            warn!(cache, key, "cache miss: no cache by that name");
        }
    }

    pub(crate) fn key_miss(&self, cache: &str, key: &str) {
        if self.reports_events() {
            warn!(cache, key, "cache miss: no entry by that key");
        }
    }

    pub(crate) fn expired(&self, cache: &str, key: &str, now: i64, expires_at: i64) {
        if self.reports_events() {
            warn!(cache, key, now, expires_at, "cache entry expired");
        }
    }
}
