//! feedcache library
//!
//! Memoized, time-expiring access to market, weather, news and synthetic demo
//! feeds. The binary is a thin wrapper over `DataFetcher`.

pub mod cache;
pub mod cli;
pub mod config;
pub mod data;
pub mod fetcher;
pub mod random;
pub mod watch;

pub use cache::{FetchError, TimedCache};
pub use fetcher::{DataFetcher, Resource};
