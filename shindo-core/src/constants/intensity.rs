//! Seismic Intensity Constants
//!
//! The intensity formula approximates the JMA instrumental seismic
//! intensity: `I = 2·log10(a) + 0.94`, where `a` is the acceleration (gal)
//! sustained for at least 0.3 s within the trailing window.

/// Additive calibration term of the intensity formula.
pub const INTENSITY_CALIBRATION: f32 = 0.94;

/// Multiplier applied to `log10(a)` in the intensity formula.
pub const INTENSITY_LOG_GAIN: f32 = 2.0;

/// Minimum duration (seconds) an acceleration must persist to count.
pub const CONTINUITY_WINDOW_SECS: f32 = 0.3;

/// Length of the magnitude history the rank statistic is taken over (seconds).
pub const HISTORY_WINDOW_SECS: u32 = 5;

/// Seconds between two intensity reports.
pub const REPORT_INTERVAL_SECS: u32 = 1;

/// Intensities at or below this value are never published.
///
/// Values under 0.5 round to JMA class 0 ("not felt").
pub const PUBLISH_THRESHOLD: f32 = 0.5;

/// Qualifying reports discarded after start while the sensor settles.
///
/// The counter is decremented down to 1; six reports are dropped with the
/// default of 7.
pub const STARTUP_SUPPRESSION: u32 = 7;

/// Floor the suppression counter stops at; publishing starts there.
pub const SUPPRESSION_FLOOR: u32 = 1;

/// Text written to the published location before the first tick.
pub const RESET_VALUE: &str = "0";
