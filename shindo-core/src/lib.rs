//! Core sampling loop for Shindo
//!
//! Turns three accelerometer channels into a seismic intensity value once a
//! second: per-axis offset removal and smoothing, a composite magnitude in
//! gal, a rank statistic over the recent history and the JMA-style scale.
//! Hardware, storage and time stay behind traits so the same loop runs on a
//! Raspberry Pi, against a recorded file, or inside a unit test.
//!
//! Key constraints:
//! - All buffers allocated once at construction
//! - Fixed-rate pacing with no catch-up after overruns
//! - Tick counter never overflows a signed 32-bit integer
//!
//! ```no_run
//! use shindo_core::prelude::*;
//! # fn adc() -> impl ChannelReader<Error = core::convert::Infallible> { struct A; impl ChannelReader for A { type Error = core::convert::Infallible; fn read_axis(&mut self, _: Axis) -> nb::Result<u16, Self::Error> { Ok(0) } } A }
//! # fn store() -> impl Publisher<Error = core::convert::Infallible> { struct S; impl Publisher for S { type Error = core::convert::Infallible; fn reset(&mut self) -> Result<(), Self::Error> { Ok(()) } fn publish(&mut self, _: shindo_core::intensity::Intensity) -> Result<(), Self::Error> { Ok(()) } } S }
//!
//! let mut meter = Seismometer::new(
//!     SeismometerConfig::default(),
//!     adc(),
//!     store(),
//!     MonotonicClock::new(),
//! )?;
//!
//! // Runs until the sensor fails
//! let _ = meter.run();
//! # Ok::<(), shindo_core::ConfigError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

#[macro_use]
mod macros;

pub mod buffer;
pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod filter;
pub mod intensity;
pub mod magnitude;
pub mod pacer;
pub mod time;
pub mod traits;

// Public API
pub use config::SeismometerConfig;
pub use engine::{ReportOutcome, RunStats, Seismometer, TickOutcome};
pub use errors::{ConfigError, ConfigResult, RunError};
pub use intensity::{Intensity, IntensityEstimator, IntensityReport, PublishDecision, SuppressionGate};
pub use time::{MockClock, Timestamp};
#[cfg(feature = "std")]
pub use time::MonotonicClock;

/// Everything needed to wire up a loop
pub mod prelude {
    pub use crate::config::SeismometerConfig;
    pub use crate::engine::{RunStats, Seismometer};
    pub use crate::errors::{ConfigError, RunError};
    pub use crate::time::MockClock;
    #[cfg(feature = "std")]
    pub use crate::time::MonotonicClock;
    pub use crate::traits::{Axis, ChannelReader, Publisher, Sleeper, TimeSource};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
