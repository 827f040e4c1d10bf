//! Core Traits and Abstractions for Shindo
//!
//! The sampling loop touches the outside world at four seams. Each one is a
//! trait so the loop can run against real hardware, a recorded CSV file or a
//! fully simulated clock in tests.
//!
//! ## Module Organization
//!
//! - [`hardware`] - Channel reader and publisher boundaries
//! - [`time`] - Time source and sleep abstractions
//!
//! ## Usage Example
//!
//! ```rust
//! use shindo_core::traits::{Axis, ChannelReader};
//!
//! struct Flat;
//!
//! impl ChannelReader for Flat {
//!     type Error = core::convert::Infallible;
//!
//!     fn read_axis(&mut self, _axis: Axis) -> nb::Result<u16, Self::Error> {
//!         Ok(2048)
//!     }
//! }
//!
//! let mut adc = Flat;
//! let raw = nb::block!(adc.read_axis(Axis::Z)).unwrap();
//! assert_eq!(raw, 2048);
//! ```

pub mod hardware;
pub mod time;

pub use hardware::{Axis, ChannelReader, Publisher};
pub use time::{Sleeper, TimeSource};
