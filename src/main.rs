//! Stash shell
//!
//! Reads cache commands from stdin and answers on stdout, driving the
//! process-wide registry.

use tokio::io::{stdin, stdout, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use stash::shell::Shell;
use stash::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // Cache diagnostics go through `debug!`/`info!`/`warn!`; the cache log
    // level decides which of them fire, so let them all through by default.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("stash=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    info!("Configuration loaded: {:?}", config);

    let registry = stash::global();
    registry.set_log_level(config.log_level);

    let shell = Shell::new(registry, config.default_ttl_seconds);
    shell.run(BufReader::new(stdin()), stdout()).await?;

    info!("Input closed, shutting down");
    Ok(())
}
