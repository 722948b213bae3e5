//! Seedable random source for synthetic data
//!
//! Every synthetic value in the crate is drawn through a `RandomSource` so a
//! fetcher built with a fixed seed produces the same fallback data every run.

use std::ops::{Range, RangeInclusive};
use std::sync::{Mutex, MutexGuard, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Thread-safe wrapper around a seedable RNG
#[derive(Debug)]
pub struct RandomSource {
    rng: Mutex<StdRng>,
}

impl RandomSource {
    /// Creates a deterministic source from a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Creates a source seeded from the operating system
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Draws a float from the half-open range, rounded to `places` decimals
    pub fn float(&self, range: Range<f64>, places: u32) -> f64 {
        round_to(self.lock().gen_range(range), places)
    }

    /// Draws an integer from the inclusive range
    pub fn int(&self, range: RangeInclusive<u32>) -> u32 {
        self.lock().gen_range(range)
    }

    /// Picks one element of a non-empty slice
    ///
    /// # Panics
    /// Panics if `items` is empty.
    pub fn pick<T: Copy>(&self, items: &[T]) -> T {
        let index = self.lock().gen_range(0..items.len());
        items[index]
    }

    /// Returns true with probability `p`
    pub fn chance(&self, p: f64) -> bool {
        self.lock().gen_bool(p.clamp(0.0, 1.0))
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}

/// Rounds a value to the given number of decimal places
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}
