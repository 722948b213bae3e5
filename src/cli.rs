//! Command-line interface parsing for feedcache
//!
//! This module handles parsing of CLI arguments using clap and turns them into a
//! `FetcherConfig` plus the `Resource` to query.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::config::{ConfigError, FetcherConfig};
use crate::fetcher::Resource;

/// Error types for CLI argument handling
#[derive(Debug, Error)]
pub enum CliError {
    /// The config file could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A weather city or news category was blank
    #[error("Invalid {0}: value must not be blank")]
    BlankParameter(&'static str),

    /// Watch interval of zero seconds
    #[error("Invalid watch interval: must be at least 1 second")]
    ZeroInterval,
}

/// feedcache - cached market, weather, news and demo feeds as JSON
#[derive(Parser, Debug)]
#[command(name = "feedcache")]
#[command(about = "Fetch market, weather, news and demo feeds through a time-expiring cache")]
#[command(version)]
pub struct Cli {
    /// Read settings from this JSON file instead of the default location
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Seed for synthetic data, for reproducible output
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Cache freshness window in seconds
    #[arg(long, value_name = "SECS", global = true)]
    pub ttl: Option<u64>,

    /// Re-query every SECS seconds until interrupted
    ///
    /// Examples:
    ///   feedcache --watch 30 crypto        # Print crypto prices every 30s
    ///   feedcache --watch 5 weather Paris  # Cached until the TTL expires
    #[arg(long, value_name = "SECS", global = true)]
    pub watch: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

/// Feed to query
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Prices for Bitcoin, Ethereum, Cardano and Solana
    Crypto,
    /// Quotes for the configured stock symbols
    Stocks,
    /// Current weather for a city
    Weather {
        #[arg(default_value = "New York")]
        city: String,
    },
    /// Top headlines for a category
    News {
        #[arg(default_value = "technology")]
        category: String,
    },
    /// Synthetic job postings
    Jobs,
    /// Synthetic property listings
    RealEstate,
    /// Synthetic restaurant waits
    Restaurants,
    /// Synthetic hospital department metrics
    Healthcare,
    /// Synthetic road conditions
    Traffic,
    /// Synthetic environmental sensor readings
    Environmental,
}

/// Everything the binary needs after argument parsing
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub fetcher: FetcherConfig,
    pub resource: Resource,
    /// Set when running in watch mode
    pub watch_interval: Option<Duration>,
}

/// Converts a subcommand into the resource it names.
///
/// # Returns
/// * `Ok(Resource)` for every subcommand
/// * `Err(CliError::BlankParameter)` if a city or category is blank
pub fn parse_resource(command: &Command) -> Result<Resource, CliError> {
    Ok(match command {
        Command::Crypto => Resource::Crypto,
        Command::Stocks => Resource::Stocks,
        Command::Weather { city } => Resource::Weather {
            city: non_blank(city, "city")?,
        },
        Command::News { category } => Resource::News {
            category: non_blank(category, "category")?,
        },
        Command::Jobs => Resource::Jobs,
        Command::RealEstate => Resource::RealEstate,
        Command::Restaurants => Resource::Restaurants,
        Command::Healthcare => Resource::Healthcare,
        Command::Traffic => Resource::Traffic,
        Command::Environmental => Resource::Environmental,
    })
}

fn non_blank(value: &str, what: &'static str) -> Result<String, CliError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(CliError::BlankParameter(what))
    } else {
        Ok(trimmed.to_string())
    }
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// Loads the config file (explicit `--config` path, or the default location
    /// if present), then applies `--seed` and `--ttl` on top.
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let base = match &cli.config {
            Some(path) => FetcherConfig::load_from(path)?,
            None => FetcherConfig::load()?,
        };
        Self::from_cli_with(cli, base)
    }

    /// Like `from_cli`, but starting from an already loaded config
    pub fn from_cli_with(cli: &Cli, mut fetcher: FetcherConfig) -> Result<Self, CliError> {
        if let Some(seed) = cli.seed {
            fetcher.seed = Some(seed);
        }
        if let Some(ttl) = cli.ttl {
            fetcher.ttl_secs = ttl;
        }
        fetcher.validate()?;

        let watch_interval = match cli.watch {
            None => None,
            Some(0) => return Err(CliError::ZeroInterval),
            Some(secs) => Some(Duration::from_secs(secs)),
        };

        Ok(StartupConfig {
            fetcher,
            resource: parse_resource(&cli.command)?,
            watch_interval,
        })
    }
}
