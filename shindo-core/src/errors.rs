//! Error Types for the Sampling Loop
//!
//! ## Error Categories
//!
//! ### Structural (fatal)
//! - `ConfigError`: a tunable makes the loop impossible (zero rate, empty
//!   continuity window). Rejected before any buffer is allocated.
//! - `RunError::Sensor`: the channel reader failed. The loop has no fallback
//!   sample and must not inject one, because a fabricated value would leak
//!   into the offset window and the smoothed state for seconds afterwards.
//! - `RunError::Reset`: the published value could not be reset at startup.
//!
//! ### Transient (logged, loop continues)
//! - Publish failures are counted in `RunStats` and logged; the next
//!   qualifying report overwrites the value anyway.
//!
//! ### Not errors
//! - `log10` of a non-positive amplitude is an explicit branch that yields
//!   intensity 0.
//!
//! ## Handling Strategy
//!
//! ```rust
//! use shindo_core::{ConfigError, SeismometerConfig};
//!
//! let config = SeismometerConfig::default().with_sampling_rate(0);
//! match config.validate() {
//!     Ok(()) => {}
//!     Err(ConfigError::ZeroSamplingRate) => {
//!         // refuse to start
//!     }
//!     Err(other) => panic!("unexpected: {other}"),
//! }
//! ```

use core::fmt;

use thiserror_no_std::Error;

use crate::traits::Axis;

/// Result type for configuration checks
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Invalid tunable combinations - kept small and `Copy`
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Sampling rate of 0 Hz
    #[error("Sampling rate must be at least 1 Hz")]
    ZeroSamplingRate,

    /// A window or interval resolved to zero samples
    #[error("{window} window resolves to zero samples")]
    EmptyWindow {
        /// Name of the offending window
        window: &'static str,
    },

    /// Continuity window longer than the history it is ranked in
    #[error("Continuity window of {continuity} samples exceeds history of {history} samples")]
    ContinuityExceedsHistory {
        /// Samples in the continuity window
        continuity: usize,
        /// Samples in the magnitude history
        history: usize,
    },

    /// Parameter outside its admissible range
    #[error("{parameter} = {value} is outside its valid range")]
    OutOfRange {
        /// Name of the parameter
        parameter: &'static str,
        /// Rejected value
        value: f32,
    },
}

/// Fatal error that stops the sampling loop
///
/// Generic over the reader error `S` and the publisher error `P` so the
/// hardware adapters keep their own error types.
#[derive(Debug)]
pub enum RunError<S, P> {
    /// Reading an axis failed
    Sensor {
        /// Axis that was being read
        axis: Axis,
        /// Error reported by the channel reader
        error: S,
    },

    /// Resetting the published value before the first tick failed
    Reset(P),
}

impl<S, P> RunError<S, P> {
    /// Reader error, if this is a sensor failure
    pub fn sensor_error(&self) -> Option<&S> {
        match self {
            Self::Sensor { error, .. } => Some(error),
            Self::Reset(_) => None,
        }
    }
}

impl<S: fmt::Display, P: fmt::Display> fmt::Display for RunError<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor { axis, error } => write!(f, "Reading axis {axis} failed: {error}"),
            Self::Reset(error) => write!(f, "Resetting published intensity failed: {error}"),
        }
    }
}

#[cfg(feature = "std")]
impl<S, P> std::error::Error for RunError<S, P>
where
    S: fmt::Debug + fmt::Display,
    P: fmt::Debug + fmt::Display,
{
}
