//! Accelerometer and ADC Parameters
//!
//! The reference build is an analog 3-axis accelerometer wired to an
//! MCP3204 12-bit SPI ADC on a Raspberry Pi.

// ===== ADC =====

/// ADC resolution in bits.
pub const ADC_RESOLUTION_BITS: u32 = 12;

/// Largest raw value the ADC can report.
pub const ADC_MAX_VALUE: u16 = (1 << ADC_RESOLUTION_BITS) - 1;

/// Number of accelerometer axes sampled per tick.
pub const AXIS_COUNT: usize = 3;

/// Conversion factor from ADC counts to gal (cm/s²).
pub const ADC_TO_GAL: f32 = 1.13426;

/// Value every slot of an axis sample window holds before the first sample.
pub const WINDOW_PREFILL: f32 = 1.0;

// ===== SMOOTHING =====

/// Weight the one-pole filter keeps from its previous state.
///
/// The newest raw sample contributes `1 - SMOOTHING_RETAIN` (0.06).
pub const SMOOTHING_RETAIN: f32 = 0.94;

// ===== SPI / GPIO WIRING =====

/// SPI clock used to talk to the MCP3204 (Hz).
pub const SPI_CLOCK_HZ: u32 = 1_000_000;

/// BCM pin number of the shutdown push button.
pub const SHUTDOWN_BUTTON_PIN: u8 = 17;
