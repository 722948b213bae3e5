//! Configuration for the data fetcher
//!
//! Settings are read from `config.json` in the XDG config directory
//! (`~/.config/feedcache/` on Linux) or from an explicit path. Every field is
//! optional in the file; missing fields take their defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::cache::DEFAULT_TTL;
use crate::data::crypto::COINGECKO_BASE_URL;
use crate::data::news::NEWS_API_BASE_URL;
use crate::data::stocks::{ALPHA_VANTAGE_BASE_URL, DEFAULT_SYMBOLS};
use crate::data::weather::OPEN_WEATHER_BASE_URL;

/// File name looked up inside the config directory
const CONFIG_FILE_NAME: &str = "config.json";

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The config file is not valid JSON for this schema
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A value is present but unusable
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Settings for `DataFetcher`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Freshness window for cached entries, in seconds
    pub ttl_secs: u64,
    pub crypto_base_url: String,
    pub stock_base_url: String,
    pub stock_api_key: String,
    /// Symbols quoted by the stocks feed, in output order
    pub stock_symbols: Vec<String>,
    pub weather_base_url: String,
    /// Weather falls back to synthetic data when unset
    pub weather_api_key: Option<String>,
    pub news_base_url: String,
    /// News falls back to synthetic data when unset
    pub news_api_key: Option<String>,
    pub news_country: String,
    /// Seed for synthetic data; random when unset
    pub seed: Option<u64>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            ttl_secs: DEFAULT_TTL.as_secs(),
            crypto_base_url: COINGECKO_BASE_URL.to_string(),
            stock_base_url: ALPHA_VANTAGE_BASE_URL.to_string(),
            stock_api_key: "demo".to_string(),
            stock_symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            weather_base_url: OPEN_WEATHER_BASE_URL.to_string(),
            weather_api_key: None,
            news_base_url: NEWS_API_BASE_URL.to_string(),
            news_api_key: None,
            news_country: "us".to_string(),
            seed: None,
        }
    }
}

impl FetcherConfig {
    /// Path of the default config file, if a home directory can be determined
    pub fn default_path() -> Option<PathBuf> {
        let project_dirs = ProjectDirs::from("", "", "feedcache")?;
        Some(project_dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Loads the default config file, or defaults if it does not exist
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Loads and validates the config file at `path`
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config");
        config.validate()?;
        Ok(config)
    }

    /// Checks values that deserialize fine but cannot be used
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ttl_secs == 0 {
            return Err(ConfigError::Invalid("ttl_secs must be greater than 0".to_string()));
        }
        if self.stock_symbols.is_empty() {
            return Err(ConfigError::Invalid("stock_symbols must not be empty".to_string()));
        }
        if let Some(symbol) = self.stock_symbols.iter().find(|s| s.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!("blank stock symbol: {:?}", symbol)));
        }
        Ok(())
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, content).expect("Failed to write config");
        path
    }

    #[test]
    fn test_defaults() {
        let config = FetcherConfig::default();
        assert_eq!(config.ttl(), Duration::from_secs(300));
        assert_eq!(config.stock_symbols, vec!["AAPL", "GOOGL", "MSFT", "AMZN", "TSLA"]);
        assert!(config.weather_api_key.is_none());
        assert!(config.news_api_key.is_none());
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = write_config(&dir, r#"{"ttl_secs": 60, "weather_api_key": "abc", "seed": 7}"#);

        let config = FetcherConfig::load_from(&path).expect("Should load partial config");

        assert_eq!(config.ttl_secs, 60);
        assert_eq!(config.weather_api_key.as_deref(), Some("abc"));
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.crypto_base_url, COINGECKO_BASE_URL);
        assert_eq!(config.news_country, "us");
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let result = FetcherConfig::load_from(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = write_config(&dir, "{ not json");
        let result = FetcherConfig::load_from(&path);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = write_config(&dir, r#"{"ttl_secs": 0}"#);
        let err = FetcherConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("ttl_secs"));
    }

    #[test]
    fn test_empty_symbols_rejected() {
        let config = FetcherConfig {
            stock_symbols: vec![],
            ..FetcherConfig::default()
        };
        assert!(config.validate().is_err());

        let config = FetcherConfig {
            stock_symbols: vec!["AAPL".to_string(), "  ".to_string()],
            ..FetcherConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_path_mentions_project() {
        if let Some(path) = FetcherConfig::default_path() {
            let path_str = path.to_string_lossy();
            assert!(path_str.contains("feedcache"), "Config path should contain project name");
            assert!(path_str.ends_with(CONFIG_FILE_NAME));
        }
        // Test passes if default_path() returns None (e.g., no home directory in CI)
    }
}
