//! Seismic Intensity Estimation
//!
//! ## Algorithm
//!
//! The estimator keeps the last few seconds of composite magnitudes and,
//! once per report interval, takes a rank statistic over them:
//!
//! ```text
//! history (ascending):  [ a₀ ≤ a₁ ≤ … ≤ a_{n-k} ≤ … ≤ a_{n-1} ]
//!                                        ↑
//!                                       minA = smallest of the k largest
//! ```
//!
//! `k` is the number of samples in the continuity window (0.3 s), so `minA`
//! is the largest acceleration that was met or exceeded for at least 0.3 s
//! within the history. A single spike cannot raise it; a shake has to
//! persist. No explicit duration tracking is needed.
//!
//! The scale follows the JMA instrumental intensity form:
//!
//! ```text
//! I = 2·log10(minA) + 0.94      (minA > 0)
//! I = 0                         (minA ≤ 0)
//! ```
//!
//! ## Publishing Policy
//!
//! Reports above the threshold (0.5) are published rounded to one decimal,
//! except during warm-up: the first qualifying reports after start only
//! count the suppression counter down to its floor. Reports at or below the
//! threshold leave the previously published value untouched.
//!
//! ## Example
//!
//! ```rust
//! use shindo_core::intensity::{IntensityEstimator, intensity_from_amplitude};
//!
//! let mut estimator = IntensityEstimator::new(10, 3);
//! for magnitude in [1.0, 1.0, 10.0, 10.0, 10.0, 1.0, 1.0, 1.0, 1.0, 1.0] {
//!     estimator.push(magnitude);
//! }
//!
//! assert_eq!(estimator.min_amplitude(), 10.0);
//! assert!((intensity_from_amplitude(10.0) - 2.94).abs() < 1e-6);
//! ```

use core::fmt::{self, Write};

use alloc::vec::Vec;
use heapless::String;
use libm::{log10f, roundf};

use crate::buffer::RingBuffer;
use crate::constants::intensity::{INTENSITY_CALIBRATION, INTENSITY_LOG_GAIN, SUPPRESSION_FLOOR};

/// Intensity scale for a sustained acceleration `min_amplitude` (gal)
pub fn intensity_from_amplitude(min_amplitude: f32) -> f32 {
    if min_amplitude > 0.0 {
        INTENSITY_LOG_GAIN * log10f(min_amplitude) + INTENSITY_CALIBRATION
    } else {
        0.0
    }
}

/// Intensity rounded to one decimal place
///
/// Stored as an integer number of tenths so formatting never shows binary
/// floating point noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Intensity {
    tenths: i32,
}

impl Intensity {
    /// Round `scale` to the nearest tenth (halves away from zero)
    pub fn from_scale(scale: f32) -> Self {
        Self { tenths: roundf(scale * 10.0) as i32 }
    }

    pub const fn from_tenths(tenths: i32) -> Self {
        Self { tenths }
    }

    pub const fn tenths(self) -> i32 {
        self.tenths
    }

    pub fn as_f32(self) -> f32 {
        self.tenths as f32 / 10.0
    }

    /// Render as text without allocating
    ///
    /// Twelve bytes hold every `i32` count of tenths, sign included.
    pub fn render(self) -> String<12> {
        let mut text = String::new();
        let _ = write!(text, "{}", self);
        text
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.tenths < 0 { "-" } else { "" };
        let abs = self.tenths.unsigned_abs();
        write!(f, "{}{}.{}", sign, abs / 10, abs % 10)
    }
}

/// Result of one intensity evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntensityReport {
    /// Rank statistic over the history (gal)
    pub min_amplitude: f32,
    /// Unrounded intensity scale
    pub scale: f32,
}

/// Rank-statistic intensity estimator over the magnitude history
#[derive(Debug, Clone)]
pub struct IntensityEstimator {
    history: RingBuffer,
    continuity_len: usize,
    scratch: Vec<f32>,
}

impl IntensityEstimator {
    /// Estimator over `history_len` magnitudes requiring `continuity_len`
    /// samples of persistence
    ///
    /// The history starts filled with zeros, which evaluate to intensity 0.
    pub fn new(history_len: usize, continuity_len: usize) -> Self {
        let history = RingBuffer::new(history_len, 0.0);
        let continuity_len = continuity_len.clamp(1, history.len());
        Self {
            scratch: Vec::with_capacity(history.len()),
            history,
            continuity_len,
        }
    }

    /// Record the composite magnitude of one tick
    pub fn push(&mut self, magnitude: f32) {
        self.history.push(magnitude);
    }

    /// Smallest value among the `continuity_len` largest magnitudes
    ///
    /// Uses a selection on a scratch copy, O(n) on average, so the history
    /// itself keeps its chronological layout.
    pub fn min_amplitude(&mut self) -> f32 {
        self.scratch.clear();
        self.scratch.extend_from_slice(self.history.as_slice());
        let rank = self.scratch.len() - self.continuity_len;
        let (_, value, _) = self.scratch.select_nth_unstable_by(rank, f32::total_cmp);
        *value
    }

    /// Evaluate the intensity over the current history
    pub fn estimate(&mut self) -> IntensityReport {
        let min_amplitude = self.min_amplitude();
        IntensityReport {
            min_amplitude,
            scale: intensity_from_amplitude(min_amplitude),
        }
    }

    pub fn history(&self) -> &RingBuffer {
        &self.history
    }

    pub fn continuity_len(&self) -> usize {
        self.continuity_len
    }
}

/// What to do with one intensity report
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PublishDecision {
    /// Store this value
    Publish(Intensity),
    /// Qualifying report dropped during warm-up
    Suppressed {
        /// Counter value after this report
        remaining: u32,
    },
    /// At or below the threshold; keep the previous value
    BelowThreshold,
}

/// Threshold check plus the warm-up suppression counter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuppressionGate {
    remaining: u32,
    threshold: f32,
}

impl SuppressionGate {
    pub fn new(startup_suppression: u32, threshold: f32) -> Self {
        Self {
            remaining: startup_suppression,
            threshold,
        }
    }

    /// Decide what to do with a report of intensity `scale`
    ///
    /// Only qualifying reports move the counter, so a quiet start does not
    /// use up the warm-up.
    pub fn evaluate(&mut self, scale: f32) -> PublishDecision {
        if scale <= self.threshold {
            return PublishDecision::BelowThreshold;
        }
        if self.remaining > SUPPRESSION_FLOOR {
            self.remaining -= 1;
            return PublishDecision::Suppressed { remaining: self.remaining };
        }
        PublishDecision::Publish(Intensity::from_scale(scale))
    }

    /// Current counter value
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// True once reports above the threshold are published
    pub fn is_open(&self) -> bool {
        self.remaining <= SUPPRESSION_FLOOR
    }
}
