//! Line-oriented shell over a cache registry.
//!
//! Each input line is one command; each command produces one reply line.

mod command;

pub use command::{parse_command, Command, CommandError, HELP};

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::cache::{CacheRegistry, Lookup};

/// What the caller should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Reply(String),
    Quit,
}

/// Executes commands against a registry.
pub struct Shell<'a> {
    registry: &'a CacheRegistry<Value>,
    default_ttl_seconds: i64,
}

impl<'a> Shell<'a> {
    pub fn new(registry: &'a CacheRegistry<Value>, default_ttl_seconds: i64) -> Self {
        Self {
            registry,
            default_ttl_seconds,
        }
    }

    /// Run one command.
    pub fn execute(&self, command: Command) -> Step {
        let reply = match command {
            Command::Put {
                cache,
                key,
                value,
                ttl_seconds,
            } => {
                let ttl = ttl_seconds.unwrap_or(self.default_ttl_seconds);
                self.registry.put(&cache, key, value, ttl);
                "OK".to_string()
            }
            Command::Get { cache, key } => match self.registry.get(&cache, &key) {
                Lookup::Hit(value) => format!("HIT {}", value),
                Lookup::Expired(value) => format!("EXPIRED {}", value),
                Lookup::CacheNotFound => "MISS cache".to_string(),
                Lookup::KeyNotFound => "MISS key".to_string(),
            },
            Command::Del { cache, key } => match self.registry.invalidate(&cache, &key) {
                Ok(()) => "OK".to_string(),
                Err(e) => format!("ERR {}", e),
            },
            Command::Purge { cache } => {
                self.registry.purge(&cache);
                "OK".to_string()
            }
            Command::PurgeAll => {
                self.registry.purge_all();
                "OK".to_string()
            }
            Command::Caches => self.registry.cache_names().join(" "),
            Command::LogLevel(level) => {
                self.registry.set_log_level(level);
                info!("Cache log level set to {}", level);
                "OK".to_string()
            }
            Command::Help => HELP.to_string(),
            Command::Quit => return Step::Quit,
        };

        Step::Reply(reply)
    }

    /// Parse and run one input line. Blank lines produce no reply.
    pub fn handle_line(&self, line: &str) -> Option<Step> {
        match parse_command(line) {
            Ok(Some(command)) => Some(self.execute(command)),
            Ok(None) => None,
            Err(e) => {
                debug!("Rejected command {:?}: {}", line, e);
                Some(Step::Reply(format!("ERR {}", e)))
            }
        }
    }

    /// Read commands from `input` until EOF or `quit`, writing replies to `output`.
    pub async fn run<R, W>(&self, input: R, mut output: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            match self.handle_line(&line) {
                Some(Step::Reply(reply)) => {
                    output.write_all(reply.as_bytes()).await?;
                    output.write_all(b"\n").await?;
                    output.flush().await?;
                }
                Some(Step::Quit) => break,
                None => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cache::{LogLevel, ManualClock};

    fn registry() -> (CacheRegistry<Value>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(1_000));
        (CacheRegistry::with_clock(clock.clone()), clock)
    }

    fn reply(shell: &Shell<'_>, line: &str) -> String {
        match shell.handle_line(line) {
            Some(Step::Reply(reply)) => reply,
            other => panic!("expected a reply to {:?}, got {:?}", line, other),
        }
    }

    #[test]
    fn test_put_get_del() {
        let (registry, _) = registry();
        let shell = Shell::new(&registry, 60);

        assert_eq!(reply(&shell, r#"put users 1 {"name":"alice"}"#), "OK");
        assert_eq!(reply(&shell, "get users 1"), r#"HIT {"name":"alice"}"#);
        assert_eq!(reply(&shell, "get users 2"), "MISS key");
        assert_eq!(reply(&shell, "get groups 1"), "MISS cache");
        assert_eq!(reply(&shell, "del users 1"), "OK");
        assert_eq!(
            reply(&shell, "del users 1"),
            "ERR no entry '1' in cache 'users'"
        );
    }

    #[test]
    fn test_default_ttl_and_expiry() {
        let (registry, clock) = registry();
        let shell = Shell::new(&registry, 10);

        reply(&shell, "put c k 1");
        clock.advance(10);
        assert_eq!(reply(&shell, "get c k"), "HIT 1");
        clock.advance(1);
        assert_eq!(reply(&shell, "get c k"), "EXPIRED 1");
        assert_eq!(reply(&shell, "get c k"), "MISS key");
    }

    #[test]
    fn test_purge_and_caches() {
        let (registry, _) = registry();
        let shell = Shell::new(&registry, 60);

        reply(&shell, "put b k 1");
        reply(&shell, "put a k 1");
        assert_eq!(reply(&shell, "caches"), "a b");
        assert_eq!(reply(&shell, "purge a"), "OK");
        assert_eq!(reply(&shell, "purge a"), "OK");
        assert_eq!(reply(&shell, "caches"), "b");
        assert_eq!(reply(&shell, "purgeall"), "OK");
        assert_eq!(reply(&shell, "caches"), "");
    }

    #[test]
    fn test_loglevel_and_errors() {
        let (registry, _) = registry();
        let shell = Shell::new(&registry, 60);

        assert_eq!(reply(&shell, "loglevel 2"), "OK");
        assert_eq!(registry.log_level(), LogLevel::Trace);
        assert!(reply(&shell, "loglevel 5").starts_with("ERR"));
        assert!(reply(&shell, "bogus").starts_with("ERR unknown command"));
        assert!(shell.handle_line("").is_none());
        assert_eq!(shell.handle_line("quit"), Some(Step::Quit));
    }

    #[tokio::test]
    async fn test_run_stops_at_quit() {
        let (registry, _) = registry();
        let shell = Shell::new(&registry, 60);

        let input: &[u8] = b"put c k \"v\"\n\nget c k\nquit\nget c k\n";
        let mut output = Vec::new();
        shell.run(input, &mut output).await.unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "OK\nHIT \"v\"\n");
    }
}
