//! Time-Related Constants
//!
//! Time conversions, the sampling cadence and the tick counter guard used by
//! the frame pacer.

// ===== TIME UNIT CONVERSIONS =====

/// Microseconds per second.
pub const US_PER_SECOND: u64 = 1_000_000;

// ===== SAMPLING =====

/// Default sampling rate of every axis (Hz).
///
/// 200 Hz gives a 5 ms frame period, well above the 0.1-10 Hz band that
/// matters for felt intensity.
pub const DEFAULT_SAMPLING_RATE_HZ: u32 = 200;

/// Tick counter value at which the pacer re-anchors its epoch.
///
/// Kept just under the signed 32-bit limit so the counter never overflows
/// on platforms that store it as `i32`.
pub const TICK_COUNTER_GUARD: u32 = i32::MAX as u32;

/// Tick counter value right after a wrap.
pub const TICK_COUNTER_RESTART: u32 = 1;

// ===== DEPLOYMENT =====

/// Debounce window of the shutdown button (milliseconds).
pub const SHUTDOWN_DEBOUNCE_MS: u64 = 250;

/// Delay before the first SPI access after boot (seconds).
///
/// The spidev driver is not always bound yet when the service starts.
pub const STARTUP_DELAY_SECS: u64 = 20;
