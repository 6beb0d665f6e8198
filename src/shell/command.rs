//! Shell command parser.
//!
//! Grammar, one command per line:
//! - `put <cache> <key> <json> [ttl]`
//! - `get <cache> <key>`
//! - `del <cache> <key>`
//! - `purge <cache>` / `purgeall`
//! - `caches`
//! - `loglevel <0|1|2>`
//! - `help`, `quit` / `exit`

use serde_json::Value;
use thiserror::Error;

use crate::cache::{InvalidLogLevel, LogLevel};

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Put {
        cache: String,
        key: String,
        value: Value,
        ttl_seconds: Option<i64>,
    },
    Get {
        cache: String,
        key: String,
    },
    Del {
        cache: String,
        key: String,
    },
    Purge {
        cache: String,
    },
    PurgeAll,
    Caches,
    LogLevel(LogLevel),
    Help,
    Quit,
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("invalid JSON value: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error(transparent)]
    InvalidLevel(#[from] InvalidLogLevel),
}

const PUT_USAGE: &str = "put <cache> <key> <json> [ttl]";
const GET_USAGE: &str = "get <cache> <key>";
const DEL_USAGE: &str = "del <cache> <key>";
const PURGE_USAGE: &str = "purge <cache>";
const LOGLEVEL_USAGE: &str = "loglevel <0|1|2>";

pub const HELP: &str = "commands: put <cache> <key> <json> [ttl] | get <cache> <key> | \
del <cache> <key> | purge <cache> | purgeall | caches | loglevel <0|1|2> | quit";

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = split_word(line);
    let command = match verb.to_lowercase().as_str() {
        "put" | "set" => parse_put(rest)?,
        "get" => {
            let (cache, key) = two_words(rest, GET_USAGE)?;
            Command::Get { cache, key }
        }
        "del" | "delete" | "invalidate" => {
            let (cache, key) = two_words(rest, DEL_USAGE)?;
            Command::Del { cache, key }
        }
        "purge" => {
            let (cache, tail) = split_word(rest);
            if cache.is_empty() || !tail.is_empty() {
                return Err(CommandError::Usage(PURGE_USAGE));
            }
            Command::Purge {
                cache: cache.to_string(),
            }
        }
        "purgeall" => Command::PurgeAll,
        "caches" => Command::Caches,
        "loglevel" => {
            if rest.is_empty() {
                return Err(CommandError::Usage(LOGLEVEL_USAGE));
            }
            Command::LogLevel(rest.parse()?)
        }
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(Some(command))
}

/// Split off the first whitespace-delimited word.
fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (input, ""),
    }
}

fn two_words(input: &str, usage: &'static str) -> Result<(String, String), CommandError> {
    let (first, rest) = split_word(input);
    let (second, tail) = split_word(rest);
    if first.is_empty() || second.is_empty() || !tail.is_empty() {
        return Err(CommandError::Usage(usage));
    }
    Ok((first.to_string(), second.to_string()))
}

fn parse_put(input: &str) -> Result<Command, CommandError> {
    let (cache, rest) = split_word(input);
    let (key, payload) = split_word(rest);
    if cache.is_empty() || key.is_empty() || payload.is_empty() {
        return Err(CommandError::Usage(PUT_USAGE));
    }

    // A trailing integer is a TTL only if what precedes it is valid JSON
    let with_ttl = payload
        .rsplit_once(char::is_whitespace)
        .and_then(|(json, ttl)| {
            let ttl = ttl.parse::<i64>().ok()?;
            let value = serde_json::from_str::<Value>(json.trim()).ok()?;
            Some((value, ttl))
        });

    let (value, ttl_seconds) = match with_ttl {
        Some((value, ttl)) => (value, Some(ttl)),
        None => (serde_json::from_str::<Value>(payload)?, None),
    };

    Ok(Command::Put {
        cache: cache.to_string(),
        key: key.to_string(),
        value,
        ttl_seconds,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_blank_line() {
        assert!(parse_command("   ").unwrap().is_none());
    }

    #[test]
    fn test_parse_put_with_ttl() {
        let command = parse_command(r#"put users 42 {"name": "alice"} 60"#).unwrap();
        assert_eq!(
            command,
            Some(Command::Put {
                cache: "users".to_string(),
                key: "42".to_string(),
                value: json!({ "name": "alice" }),
                ttl_seconds: Some(60),
            })
        );
    }

    #[test]
    fn test_parse_put_without_ttl() {
        let command = parse_command(r#"PUT c k "two words""#).unwrap();
        assert_eq!(
            command,
            Some(Command::Put {
                cache: "c".to_string(),
                key: "k".to_string(),
                value: json!("two words"),
                ttl_seconds: None,
            })
        );

        // A lone number is the value, not a TTL
        let command = parse_command("put c k 5").unwrap();
        assert!(matches!(
            command,
            Some(Command::Put { ref value, ttl_seconds: None, .. }) if *value == json!(5)
        ));
    }

    #[test]
    fn test_parse_put_negative_ttl() {
        let command = parse_command("put c k true -1").unwrap();
        assert!(matches!(
            command,
            Some(Command::Put { ttl_seconds: Some(-1), .. })
        ));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_command("put c k"), Err(CommandError::Usage(_))));
        assert!(matches!(
            parse_command("put c k {oops"),
            Err(CommandError::InvalidJson(_))
        ));
        assert!(matches!(parse_command("get c"), Err(CommandError::Usage(_))));
        assert!(matches!(parse_command("del c k extra"), Err(CommandError::Usage(_))));
        assert!(matches!(parse_command("purge"), Err(CommandError::Usage(_))));
        assert!(matches!(
            parse_command("loglevel 9"),
            Err(CommandError::InvalidLevel(_))
        ));
        assert!(matches!(parse_command("frobnicate"), Err(CommandError::Unknown(_))));
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_command("purgeall").unwrap(), Some(Command::PurgeAll));
        assert_eq!(parse_command("caches").unwrap(), Some(Command::Caches));
        assert_eq!(
            parse_command("loglevel 1").unwrap(),
            Some(Command::LogLevel(LogLevel::Events))
        );
        assert_eq!(parse_command("exit").unwrap(), Some(Command::Quit));
        assert_eq!(
            parse_command("del c k").unwrap(),
            Some(Command::Del {
                cache: "c".to_string(),
                key: "k".to_string()
            })
        );
    }
}
