//! Hardware and Storage Adapters for Shindo
//!
//! ## Overview
//!
//! The core loop only knows the `ChannelReader` and `Publisher` traits.
//! This crate supplies the implementations a deployed seismometer uses:
//!
//! | Module      | Role                                    | Needs            |
//! |-------------|-----------------------------------------|------------------|
//! | [`file`]    | Publish the intensity to a text file    | -                |
//! | [`replay`]  | Feed a CSV recording instead of the ADC | -                |
//! | [`mcp3204`] | Read the accelerometer over SPI         | `raspberry-pi`   |
//! | [`shutdown`]| Power off from a push button on GPIO    | `raspberry-pi`   |
//! | [`display`] | Mirror the intensity on an SSD1306 OLED | `display`        |
//! | [`tee`]     | Publish to the file and the display     | -                |
//! | [`trace`]   | CSV row per report for replay analysis  | -                |
//!
//! Frame encoding for the ADC, text layout for the display and the
//! shutdown command itself build on any host; only the parts that open
//! `/dev/spidev*`, `/dev/gpiomem` or `/dev/i2c-*` are gated behind the
//! `raspberry-pi` and `display` features.
//!
//! ## Example Usage
//!
//! ```rust
//! use shindo_connectors::{file::FilePublisher, replay::ReplayReader};
//! use shindo_core::prelude::*;
//!
//! let dir = tempfile::tempdir()?;
//! let recording = "2048,2048,2048\n".repeat(400);
//!
//! let clock = MockClock::new(0);
//! let mut meter = Seismometer::new(
//!     SeismometerConfig::default(),
//!     ReplayReader::from_reader(recording.as_bytes()),
//!     FilePublisher::new(dir.path().join("value.txt")),
//!     &clock,
//! )?;
//!
//! let err = meter.run().unwrap_err();
//! assert!(err.sensor_error().is_some_and(|e| e.is_exhausted()));
//! assert_eq!(meter.stats().ticks, 400);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod display;
pub mod file;
pub mod mcp3204;
pub mod replay;
pub mod shutdown;
pub mod tee;
pub mod trace;

// Re-export common types
pub use display::draw_value;
#[cfg(feature = "display")]
pub use display::{DisplayError, OledPublisher};
pub use file::{FilePublisher, FilePublisherError};
pub use mcp3204::{command_frame, decode_frame, ChannelMap};
#[cfg(feature = "raspberry-pi")]
pub use mcp3204::{Mcp3204Error, Mcp3204Reader, SpiSettings};
pub use replay::{ReplayError, ReplayReader};
pub use shutdown::{ShutdownAction, ShutdownError};
#[cfg(feature = "raspberry-pi")]
pub use shutdown::ShutdownButton;
pub use tee::{Tee, TeeError};
pub use trace::{TraceError, TraceWriter};
