//! Configuration module for Stash.
//!
//! Loads configuration from environment variables.

use std::env;

use thiserror::Error;

use crate::cache::{InvalidLogLevel, LogLevel};

/// TTL used by the shell when a `put` gives none.
pub const DEFAULT_TTL_SECONDS: i64 = 300;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("STASH_LOG_LEVEL: {0}")]
    InvalidLogLevel(#[from] InvalidLogLevel),

    #[error("STASH_DEFAULT_TTL: '{0}' is not a whole number of seconds")]
    InvalidTtl(String),
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Cache diagnostic level (0 = silent, 1 = events, 2 = trace).
    pub log_level: LogLevel,

    /// TTL applied when a command does not specify one.
    pub default_ttl_seconds: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Silent,
            default_ttl_seconds: DEFAULT_TTL_SECONDS,
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env`, if any).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value. Unset or blank variables fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let log_level = match read("STASH_LOG_LEVEL") {
            Some(raw) => raw.parse::<LogLevel>()?,
            None => LogLevel::Silent,
        };

        let default_ttl_seconds = match read("STASH_DEFAULT_TTL") {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .map_err(|_| ConfigError::InvalidTtl(raw))?,
            None => DEFAULT_TTL_SECONDS,
        };

        Ok(Self {
            log_level,
            default_ttl_seconds,
        })
    }
}
