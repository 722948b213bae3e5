//! feedcache - query cached feeds from the command line
//!
//! Prints the requested feed as pretty JSON on stdout. Logs go to stderr and
//! are controlled with `RUST_LOG` (default `warn`).

use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use feedcache::cli::{Cli, StartupConfig};
use feedcache::watch::{WatchHandle, WatchMessage};
use feedcache::DataFetcher;

/// Installs a stderr subscriber so stdout stays machine-readable
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json(value: &serde_json::Value) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let cli = Cli::parse();
    let startup = match StartupConfig::from_cli(&cli) {
        Ok(startup) => startup,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    };
    let fetcher = Arc::new(DataFetcher::new(&startup.fetcher));

    let Some(interval) = startup.watch_interval else {
        let data = fetcher.fetch_json(&startup.resource).await?;
        print_json(&data)?;
        return Ok(());
    };

    info!(resource = %startup.resource, ?interval, "watching");
    let mut handle = WatchHandle::spawn(fetcher, startup.resource, interval);

    loop {
        tokio::select! {
            message = handle.next() => match message {
                Some(WatchMessage::Snapshot { tick, from_cache, data }) => {
                    info!(tick, from_cache, "snapshot");
                    print_json(&data)?;
                }
                Some(WatchMessage::Failed { tick, error }) => {
                    warn!(tick, error = %error, "watch read failed");
                }
                None => break,
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    handle.shutdown().await;
    Ok(())
}
