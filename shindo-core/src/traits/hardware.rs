//! Hardware Boundaries
//!
//! The ADC transfer protocol and the storage of the published value live
//! outside the core. The loop only sees these two traits.

use core::fmt;

use crate::intensity::Intensity;

/// One accelerometer axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// Horizontal axis, ADC channel 0 by default
    X,
    /// Horizontal axis, ADC channel 1 by default
    Y,
    /// Vertical axis, ADC channel 2 by default
    Z,
}

impl Axis {
    /// All axes in sampling order
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Position of the axis in per-axis arrays
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        };
        f.write_str(name)
    }
}

/// Source of raw accelerometer samples
///
/// Follows the `nb` one-shot ADC convention: `WouldBlock` while a
/// conversion is pending, `Other` for a failure. The loop blocks on
/// `WouldBlock` and treats `Other` as fatal.
///
/// ## Implementation Requirements
///
/// - Values are raw ADC counts, 0..=4095 for a 12-bit converter
/// - Never substitute a value on failure; return the error instead
pub trait ChannelReader {
    /// Transport or decoding failure
    type Error;

    /// Read the current raw value of one axis
    fn read_axis(&mut self, axis: Axis) -> nb::Result<u16, Self::Error>;
}

/// Durable store of the latest intensity
///
/// Every call fully replaces the stored value. Readers of the store only
/// ever see the last complete write.
pub trait Publisher {
    /// Storage failure
    type Error;

    /// Overwrite the stored value with the startup marker `"0"`
    fn reset(&mut self) -> Result<(), Self::Error>;

    /// Overwrite the stored value with `intensity`
    fn publish(&mut self, intensity: Intensity) -> Result<(), Self::Error>;
}

impl<T: ChannelReader + ?Sized> ChannelReader for &mut T {
    type Error = T::Error;

    fn read_axis(&mut self, axis: Axis) -> nb::Result<u16, Self::Error> {
        (**self).read_axis(axis)
    }
}

impl<T: Publisher + ?Sized> Publisher for &mut T {
    type Error = T::Error;

    fn reset(&mut self) -> Result<(), Self::Error> {
        (**self).reset()
    }

    fn publish(&mut self, intensity: Intensity) -> Result<(), Self::Error> {
        (**self).publish(intensity)
    }
}
