//! Periodic re-query of a single feed
//!
//! Runs a background tokio task that asks the fetcher for one resource on a
//! fixed interval and forwards each result over a channel. Because reads go
//! through the cache, the same snapshot repeats until the entry goes stale.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

use crate::cache::FetchError;
use crate::fetcher::{DataFetcher, Resource};

/// Messages sent from the watch task to its owner
#[derive(Debug, Clone)]
pub enum WatchMessage {
    /// The resource was read successfully
    Snapshot {
        /// 1-based tick number
        tick: u64,
        /// Whether the entry was fresh before this read
        from_cache: bool,
        data: serde_json::Value,
    },
    /// The read failed
    Failed { tick: u64, error: FetchError },
}

/// Handle for a running watch task
pub struct WatchHandle {
    /// Channel for receiving watch messages
    pub receiver: mpsc::Receiver<WatchMessage>,
    shutdown_tx: mpsc::Sender<()>,
}

impl WatchHandle {
    /// Spawns a task that reads `resource` immediately and then every `interval`
    ///
    /// # Panics
    /// Panics if `interval` is zero.
    pub fn spawn(fetcher: Arc<DataFetcher>, resource: Resource, interval: Duration) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel(32);
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            let key = resource.cache_key();
            let mut tick = 0u64;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        tick += 1;
                        let from_cache = fetcher.cache().is_fresh(&key);
                        debug!(tick, key = %key, from_cache, "watch tick");

                        let message = match fetcher.fetch_json(&resource).await {
                            Ok(data) => WatchMessage::Snapshot { tick, from_cache, data },
                            Err(error) => WatchMessage::Failed { tick, error },
                        };
                        if msg_tx.send(message).await.is_err() {
                            // Receiver dropped
                            break;
                        }
                    }
                    _ = shutdown_rx.recv() => {
                        break;
                    }
                }
            }
        });

        Self {
            receiver: msg_rx,
            shutdown_tx,
        }
    }

    /// Waits for the next message; `None` once the task has stopped
    pub async fn next(&mut self) -> Option<WatchMessage> {
        self.receiver.recv().await
    }

    /// Stops the watch task
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}
