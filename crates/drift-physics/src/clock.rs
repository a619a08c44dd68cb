//! Time sources for frame-delta consumers.
//!
//! Each consumer (the physics driver, the camera) owns its own clock and
//! therefore its own "last reset" mark.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Microsecond stopwatch.
pub trait Clock {
    /// Microseconds since the last [`reset`](Clock::reset) (or creation).
    fn elapsed_micros(&self) -> u64;
    /// Restarts the measurement from now.
    fn reset(&mut self);
}

/// Wall-clock stopwatch backed by [`Instant`].
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    mark: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            mark: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn elapsed_micros(&self) -> u64 {
        u64::try_from(self.mark.elapsed().as_micros()).unwrap_or(u64::MAX)
    }

    fn reset(&mut self) {
        self.mark = Instant::now();
    }
}

/// Hand-advanced clock for scripted runs and tests.
///
/// Clones share the same time line but keep separate reset marks, so one
/// `advance` is seen by every consumer holding a clone.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
    mark: u64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance_micros(&self, micros: u64) {
        self.now.fetch_add(micros, Ordering::Relaxed);
    }

    pub fn advance(&self, by: Duration) {
        self.advance_micros(u64::try_from(by.as_micros()).unwrap_or(u64::MAX));
    }

    /// Total microseconds advanced since creation.
    pub fn now_micros(&self) -> u64 {
        self.now.load(Ordering::Relaxed)
    }
}

impl Clock for ManualClock {
    fn elapsed_micros(&self) -> u64 {
        self.now_micros().saturating_sub(self.mark)
    }

    fn reset(&mut self) {
        self.mark = self.now_micros();
    }
}
