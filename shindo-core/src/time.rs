//! Time management for the sampling loop
//!
//! Provides the clock implementations behind the `TimeSource` and `Sleeper`
//! traits:
//! - System monotonic clock (when `std` is available)
//! - Virtual clock for tests and for replaying recordings faster than
//!   real time

use core::cell::Cell;
use core::time::Duration;

pub use crate::traits::time::{Sleeper, TimeSource};

/// Timestamp in microseconds since the clock's epoch
pub type Timestamp = u64;

/// Convert a duration to a timestamp delta, saturating on overflow
pub fn duration_to_us(duration: Duration) -> Timestamp {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}

/// Monotonic clock backed by `std::time::Instant`
///
/// The epoch is the moment the clock was created.
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl MonotonicClock {
    pub fn new() -> Self {
        Self { origin: std::time::Instant::now() }
    }
}

#[cfg(feature = "std")]
impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl TimeSource for MonotonicClock {
    fn now(&self) -> Timestamp {
        duration_to_us(self.origin.elapsed())
    }
}

#[cfg(feature = "std")]
impl Sleeper for MonotonicClock {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Virtual clock for testing
///
/// `sleep` advances the clock instead of blocking, so a loop paced by this
/// clock runs as fast as the CPU allows while still seeing a consistent
/// timeline. Interior mutability lets readers that simulate slow hardware
/// share it by reference with the loop.
#[derive(Debug, Default)]
pub struct MockClock {
    now: Cell<Timestamp>,
    slept: Cell<Timestamp>,
    sleeps: Cell<u64>,
    last_sleep: Cell<Option<Duration>>,
}

impl MockClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Cell::new(start),
            ..Self::default()
        }
    }

    /// Jump to an absolute time
    pub fn set(&self, timestamp: Timestamp) {
        self.now.set(timestamp);
    }

    /// Move the clock forward without counting it as sleep
    pub fn advance(&self, duration: Duration) {
        self.now.set(self.now.get().saturating_add(duration_to_us(duration)));
    }

    /// Total time spent in `sleep` (microseconds)
    pub fn total_slept_us(&self) -> Timestamp {
        self.slept.get()
    }

    /// Number of `sleep` calls
    pub fn sleep_count(&self) -> u64 {
        self.sleeps.get()
    }

    /// Duration passed to the most recent `sleep`
    pub fn last_sleep(&self) -> Option<Duration> {
        self.last_sleep.get()
    }
}

impl TimeSource for MockClock {
    fn now(&self) -> Timestamp {
        self.now.get()
    }
}

impl Sleeper for MockClock {
    fn sleep(&self, duration: Duration) {
        let us = duration_to_us(duration);
        self.now.set(self.now.get().saturating_add(us));
        self.slept.set(self.slept.get().saturating_add(us));
        self.sleeps.set(self.sleeps.get() + 1);
        self.last_sleep.set(Some(duration));
    }
}
