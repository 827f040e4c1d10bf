//! Seismometer tunables
//!
//! Every number the sampling loop depends on, with defaults matching the
//! reference 200 Hz build. Window lengths are given in seconds and resolved
//! to sample counts against the sampling rate.
//!
//! ```rust
//! use shindo_core::SeismometerConfig;
//!
//! let config = SeismometerConfig::default()
//!     .with_sampling_rate(100)
//!     .with_startup_suppression(3);
//!
//! assert!(config.validate().is_ok());
//! assert_eq!(config.history_len(), 500);
//! assert_eq!(config.continuity_len(), 30);
//! ```

use libm::roundf;

use crate::constants::{
    intensity::{
        CONTINUITY_WINDOW_SECS, HISTORY_WINDOW_SECS, PUBLISH_THRESHOLD, REPORT_INTERVAL_SECS,
        STARTUP_SUPPRESSION,
    },
    sensors::{ADC_TO_GAL, SMOOTHING_RETAIN},
    time::{DEFAULT_SAMPLING_RATE_HZ, TICK_COUNTER_GUARD, TICK_COUNTER_RESTART},
};
use crate::errors::{ConfigError, ConfigResult};

/// Configuration of the sampling loop
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SeismometerConfig {
    /// Samples per second on every axis
    pub sampling_rate_hz: u32,

    /// ADC counts to gal
    pub adc_to_gal: f32,

    /// Weight the smoothing filter keeps from its previous state
    pub smoothing_retain: f32,

    /// Minimum persistence of an acceleration to count (seconds)
    pub continuity_secs: f32,

    /// Length of the magnitude history (seconds)
    pub history_secs: u32,

    /// Seconds between intensity reports
    pub report_interval_secs: u32,

    /// Intensities at or below this are not published
    pub publish_threshold: f32,

    /// Initial value of the warm-up suppression counter
    pub startup_suppression: u32,

    /// Tick counter value that triggers an epoch re-anchor
    pub tick_guard: u32,
}

impl Default for SeismometerConfig {
    fn default() -> Self {
        Self {
            sampling_rate_hz: DEFAULT_SAMPLING_RATE_HZ,
            adc_to_gal: ADC_TO_GAL,
            smoothing_retain: SMOOTHING_RETAIN,
            continuity_secs: CONTINUITY_WINDOW_SECS,
            history_secs: HISTORY_WINDOW_SECS,
            report_interval_secs: REPORT_INTERVAL_SECS,
            publish_threshold: PUBLISH_THRESHOLD,
            startup_suppression: STARTUP_SUPPRESSION,
            tick_guard: TICK_COUNTER_GUARD,
        }
    }
}

impl SeismometerConfig {
    pub fn with_sampling_rate(mut self, hz: u32) -> Self {
        self.sampling_rate_hz = hz;
        self
    }

    pub fn with_adc_to_gal(mut self, gain: f32) -> Self {
        self.adc_to_gal = gain;
        self
    }

    pub fn with_smoothing(mut self, retain: f32) -> Self {
        self.smoothing_retain = retain;
        self
    }

    pub fn with_continuity_secs(mut self, secs: f32) -> Self {
        self.continuity_secs = secs;
        self
    }

    pub fn with_history_secs(mut self, secs: u32) -> Self {
        self.history_secs = secs;
        self
    }

    pub fn with_report_interval_secs(mut self, secs: u32) -> Self {
        self.report_interval_secs = secs;
        self
    }

    pub fn with_publish_threshold(mut self, threshold: f32) -> Self {
        self.publish_threshold = threshold;
        self
    }

    pub fn with_startup_suppression(mut self, count: u32) -> Self {
        self.startup_suppression = count;
        self
    }

    pub fn with_tick_guard(mut self, guard: u32) -> Self {
        self.tick_guard = guard;
        self
    }

    /// Samples in each axis offset window (one second)
    pub fn window_len(&self) -> usize {
        self.sampling_rate_hz as usize
    }

    /// Samples in the magnitude history
    pub fn history_len(&self) -> usize {
        self.sampling_rate_hz as usize * self.history_secs as usize
    }

    /// Samples an acceleration must persist to count
    ///
    /// Rounded rather than truncated, so 0.3 s at 200 Hz is 60 even though
    /// `200.0 * 0.3` is not exactly representable.
    pub fn continuity_len(&self) -> usize {
        let samples = roundf(self.sampling_rate_hz as f32 * self.continuity_secs);
        if samples <= 0.0 { 0 } else { samples as usize }
    }

    /// Ticks between two intensity reports
    pub fn report_interval_ticks(&self) -> u32 {
        self.sampling_rate_hz.saturating_mul(self.report_interval_secs)
    }

    /// Check that the loop can run with these values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.sampling_rate_hz == 0 {
            return Err(ConfigError::ZeroSamplingRate);
        }
        if !(self.adc_to_gal.is_finite() && self.adc_to_gal > 0.0) {
            return Err(ConfigError::OutOfRange { parameter: "adc_to_gal", value: self.adc_to_gal });
        }
        if !(0.0..1.0).contains(&self.smoothing_retain) {
            return Err(ConfigError::OutOfRange {
                parameter: "smoothing_retain",
                value: self.smoothing_retain,
            });
        }
        if !self.continuity_secs.is_finite() {
            return Err(ConfigError::OutOfRange {
                parameter: "continuity_secs",
                value: self.continuity_secs,
            });
        }
        if !self.publish_threshold.is_finite() {
            return Err(ConfigError::OutOfRange {
                parameter: "publish_threshold",
                value: self.publish_threshold,
            });
        }
        if self.history_secs == 0 {
            return Err(ConfigError::EmptyWindow { window: "history" });
        }
        if self.report_interval_secs == 0 {
            return Err(ConfigError::EmptyWindow { window: "report interval" });
        }
        let continuity = self.continuity_len();
        if continuity == 0 {
            return Err(ConfigError::EmptyWindow { window: "continuity" });
        }
        let history = self.history_len();
        if continuity > history {
            return Err(ConfigError::ContinuityExceedsHistory { continuity, history });
        }
        if self.tick_guard <= TICK_COUNTER_RESTART {
            return Err(ConfigError::OutOfRange {
                parameter: "tick_guard",
                value: self.tick_guard as f32,
            });
        }
        Ok(())
    }
}
