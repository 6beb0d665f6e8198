//! Stash - Named in-memory caches
//!
//! Process-wide, named key-value caches whose entries expire after a
//! per-entry TTL.
//!
//! ## Architecture
//!
//! - `cache` - Registry, named caches, lazy expiration
//! - `config` - Environment configuration
//! - `shell` - Line-oriented command interpreter used by the binary

pub mod cache;
pub mod config;
pub mod shell;

pub use cache::{
    get, global, invalidate, purge, purge_all, put, set_log_level, try_get, CacheError,
    CacheRegistry, Clock, LogLevel, Lookup, ManualClock, NamedCache, Outcome, SystemClock,
};
pub use config::{Config, ConfigError};
