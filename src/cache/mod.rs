//! In-memory cache with time-based expiry
//!
//! This module provides a `TimedCache` that memoizes the output of async
//! producers under string keys. Entries are fresh for a fixed TTL measured
//! against an injectable `Clock`, so tests can move time forward without
//! sleeping.

mod clock;
mod timed;

pub use clock::{Clock, ManualClock, SystemClock};
pub use timed::{FetchError, TimedCache, DEFAULT_TTL};
