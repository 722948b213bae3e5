//! Time-expiring memoization of async producers
//!
//! Provides a `TimedCache` that stores producer results in memory with the time
//! they were stored. A fresh entry is served without calling the producer; a
//! stale or missing one triggers exactly one producer call.

use std::any::Any;
use std::collections::HashMap;
use std::fmt::Display;
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, error};

use super::clock::{Clock, SystemClock};

/// Default freshness window for cached entries (5 minutes)
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Errors surfaced to callers of the cache
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The producer failed; nothing was cached
    #[error("producer for '{key}' failed: {reason}")]
    Producer { key: String, reason: String },

    /// A cached value could not be converted to JSON
    #[error("failed to encode '{key}': {reason}")]
    Encode { key: String, reason: String },
}

/// A single stored value
struct CacheEntry {
    /// The cached value, shared with every caller that reads it
    data: Arc<dyn Any + Send + Sync>,
    /// When the value was stored
    stored_at: Instant,
}

/// In-memory map of key to producer result
///
/// Entries are never evicted; a stale entry stays in the map until the next
/// successful fetch for its key replaces it. Concurrent misses on the same key
/// are not de-duplicated: each caller runs its own producer and the last one to
/// finish wins.
pub struct TimedCache {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl TimedCache {
    /// Creates a cache with the default TTL and the system clock
    pub fn new() -> Self {
        Self::with_clock(DEFAULT_TTL, Arc::new(SystemClock))
    }

    /// Creates a cache with a custom TTL and time source
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Freshness window for entries
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of stored entries, fresh or stale
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `key` holds an entry younger than the TTL
    pub fn is_fresh(&self, key: &str) -> bool {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(key)
            .map(|entry| self.within_ttl(entry))
            .unwrap_or(false)
    }

    /// Returns the cached value for `key`, or runs `producer` and caches its result
    ///
    /// # Arguments
    /// * `key` - Cache key, e.g. `"weather_Boston"`
    /// * `producer` - Called at most once, only when no fresh entry of type `T` exists
    ///
    /// # Returns
    /// * `Ok(Arc<T>)` - The cached or freshly produced value
    /// * `Err(FetchError::Producer)` - The producer failed; the entry is left as it was
    pub async fn get_cached<T, F, Fut, E>(&self, key: &str, producer: F) -> Result<Arc<T>, FetchError>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        if let Some(data) = self.lookup::<T>(key) {
            debug!(key, "cache hit");
            return Ok(data);
        }

        debug!(key, "cache miss");
        match producer().await {
            Ok(value) => {
                let data = Arc::new(value);
                self.store(key, data.clone());
                Ok(data)
            }
            Err(e) => {
                error!(key, error = %e, "producer failed, entry left untouched");
                Err(FetchError::Producer {
                    key: key.to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }

    fn within_ttl(&self, entry: &CacheEntry) -> bool {
        self.clock.now().saturating_duration_since(entry.stored_at) < self.ttl
    }

    /// Reads a fresh entry of type `T`; a type mismatch counts as a miss
    fn lookup<T: Send + Sync + 'static>(&self, key: &str) -> Option<Arc<T>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let entry = entries.get(key)?;
        if !self.within_ttl(entry) {
            return None;
        }
        entry.data.clone().downcast::<T>().ok()
    }

    fn store<T: Send + Sync + 'static>(&self, key: &str, data: Arc<T>) {
        let entry = CacheEntry {
            data,
            stored_at: self.clock.now(),
        };
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), entry);
    }
}

impl Default for TimedCache {
    fn default() -> Self {
        Self::new()
    }
}
