//! Constants for Shindo Core
//!
//! Default values of every tunable of the seismometer, grouped by domain:
//! - **Sensors**: ADC range, gal conversion, smoothing, wiring
//! - **Intensity**: formula terms, windows, publishing policy
//! - **Time**: unit conversions, sampling cadence, counter guard
//!
//! `SeismometerConfig::default()` is built from these values.

/// ADC, accelerometer and wiring constants.
pub mod sensors;

/// Intensity formula and publishing policy constants.
pub mod intensity;

/// Time conversions and pacing constants.
pub mod time;

pub use sensors::{ADC_MAX_VALUE, ADC_TO_GAL, AXIS_COUNT, SMOOTHING_RETAIN, WINDOW_PREFILL};

pub use intensity::{
    CONTINUITY_WINDOW_SECS, HISTORY_WINDOW_SECS, INTENSITY_CALIBRATION, PUBLISH_THRESHOLD,
    REPORT_INTERVAL_SECS, STARTUP_SUPPRESSION,
};

pub use time::{DEFAULT_SAMPLING_RATE_HZ, TICK_COUNTER_GUARD, US_PER_SECOND};
