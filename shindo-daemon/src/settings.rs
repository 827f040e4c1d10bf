//! Deployment settings
//!
//! Everything the daemon needs besides the loop tunables: where the value
//! file lives, how the ADC, the shutdown button and the optional OLED panel
//! are wired, how long to wait for the drivers after boot. Loaded from a JSON file; every field is
//! optional and falls back to the stock Raspberry Pi build.
//!
//! ```json
//! {
//!   "output": "/home/pi/python/value.txt",
//!   "startup_delay_secs": 20,
//!   "spi": { "bus": 0, "slave_select": 0, "clock_hz": 1000000, "channels": [0, 1, 2] },
//!   "shutdown_button": { "enabled": true, "pin": 17, "debounce_ms": 250 },
//!   "display": { "enabled": false, "i2c_device": "/dev/i2c-1" },
//!   "seismometer": { "sampling_rate_hz": 200 }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shindo_core::constants::sensors::{SHUTDOWN_BUTTON_PIN, SPI_CLOCK_HZ};
use shindo_core::constants::time::{SHUTDOWN_DEBOUNCE_MS, STARTUP_DELAY_SECS};
use shindo_core::SeismometerConfig;

/// Default location of the published intensity
pub const DEFAULT_OUTPUT: &str = "/home/pi/python/value.txt";

/// Default power-off command
pub const DEFAULT_SHUTDOWN_COMMAND: &str = "sudo shutdown -h now";

/// I2C bus of the OLED panel in the stock build
pub const DEFAULT_I2C_DEVICE: &str = "/dev/i2c-1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DaemonSettings {
    /// File the intensity is written to
    pub output: PathBuf,
    /// Wait after start before touching the hardware
    pub startup_delay_secs: u64,
    pub spi: SpiConfig,
    pub shutdown_button: ShutdownButtonConfig,
    pub display: DisplayConfig,
    /// Loop tunables
    pub seismometer: SeismometerConfig,
}

impl Default for DaemonSettings {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            startup_delay_secs: STARTUP_DELAY_SECS,
            spi: SpiConfig::default(),
            shutdown_button: ShutdownButtonConfig::default(),
            display: DisplayConfig::default(),
            seismometer: SeismometerConfig::default(),
        }
    }
}

impl DaemonSettings {
    /// Read settings from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Reading settings from {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Parsing settings in {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(text)?;
        Ok(settings)
    }

    pub fn startup_delay(&self) -> Duration {
        Duration::from_secs(self.startup_delay_secs)
    }

    /// Reject combinations the daemon cannot run with
    pub fn validate(&self) -> Result<()> {
        self.seismometer.validate().context("Invalid seismometer settings")?;
        if self.output.as_os_str().is_empty() {
            anyhow::bail!("Output path is empty");
        }
        if self.spi.clock_hz == 0 {
            anyhow::bail!("SPI clock must be non-zero");
        }
        if self.shutdown_button.enabled && self.shutdown_button.command.trim().is_empty() {
            anyhow::bail!("Shutdown button is enabled but the shutdown command is empty");
        }
        if self.display.enabled && self.display.i2c_device.trim().is_empty() {
            anyhow::bail!("Display is enabled but no I2C device is set");
        }
        Ok(())
    }
}

/// ADC wiring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpiConfig {
    pub bus: u8,
    pub slave_select: u8,
    pub clock_hz: u32,
    /// ADC input of the X, Y and Z outputs
    pub channels: [u8; 3],
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self {
            bus: 0,
            slave_select: 0,
            clock_hz: SPI_CLOCK_HZ,
            channels: [0, 1, 2],
        }
    }
}

#[cfg(feature = "raspberry-pi")]
impl From<&SpiConfig> for shindo_connectors::SpiSettings {
    fn from(config: &SpiConfig) -> Self {
        Self {
            bus: config.bus,
            slave_select: config.slave_select,
            clock_hz: config.clock_hz,
            channels: shindo_connectors::ChannelMap { channels: config.channels },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShutdownButtonConfig {
    pub enabled: bool,
    /// BCM pin number
    pub pin: u8,
    pub debounce_ms: u64,
    pub command: String,
}

impl ShutdownButtonConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for ShutdownButtonConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            pin: SHUTDOWN_BUTTON_PIN,
            debounce_ms: SHUTDOWN_DEBOUNCE_MS,
            command: DEFAULT_SHUTDOWN_COMMAND.to_string(),
        }
    }
}

/// OLED panel mirroring the value file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub enabled: bool,
    pub i2c_device: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            i2c_device: DEFAULT_I2C_DEVICE.to_string(),
        }
    }
}
