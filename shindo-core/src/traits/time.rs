//! Time Source Abstraction
//!
//! The frame pacer only needs two things from the platform: a monotonic
//! "now" and a way to suspend the loop. Splitting them into traits lets the
//! tests drive thousands of frames on virtual time.
//!
//! ## Common Implementations
//!
//! - `MonotonicClock`: `std::time::Instant` plus `thread::sleep`
//! - `MockClock`: virtual time where sleeping advances the clock

use core::time::Duration;

use crate::time::Timestamp;

/// Source of monotonic time
///
/// ## Implementation Requirements
///
/// - `now()` never goes backwards
/// - The epoch is arbitrary; only differences are used
pub trait TimeSource {
    /// Microseconds since the source's epoch
    fn now(&self) -> Timestamp;
}

/// Suspends the calling loop
pub trait Sleeper {
    /// Block for `duration`
    fn sleep(&self, duration: Duration);
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

impl<T: Sleeper + ?Sized> Sleeper for &T {
    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration)
    }
}
