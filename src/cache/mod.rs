//! Cache module - Named caches with lazy TTL expiration.
//!
//! ## Architecture
//!
//! The cache system follows a registry pattern:
//! - `CacheRegistry` - Central registry mapping names to caches
//! - `NamedCache` - One key-value collection with its own lock
//! - `Entry` - A value plus the unix second it expires after
//!
//! Expiration is lazy. Nothing sweeps the caches in the background; a
//! stale entry is evicted by the first `get` that notices it.
//!
//! ## Usage
//!
//! ```rust
//! use stash::{CacheRegistry, Lookup};
//!
//! let registry = CacheRegistry::new();
//! registry.put("sessions", "abc", 17u64, 300);
//!
//! match registry.get("sessions", "abc") {
//!     Lookup::Hit(user_id) => assert_eq!(user_id, 17),
//!     other => panic!("unexpected {:?}", other.outcome()),
//! }
//! ```

mod clock;
mod diagnostics;
mod entry;
mod error;
mod global;
mod lookup;
mod named;
mod registry;

pub use clock::{Clock, ManualClock, SystemClock};
pub use diagnostics::{Diagnostics, InvalidLogLevel, LogLevel};
pub use entry::Entry;
pub use error::CacheError;
pub use global::{get, global, invalidate, purge, purge_all, put, set_log_level, try_get};
pub use lookup::{Lookup, Outcome};
pub use named::NamedCache;
pub use registry::CacheRegistry;
