//! MCP3204 12-bit ADC over SPI
//!
//! ## Transfer Frame
//!
//! One single-ended conversion is a 3-byte full-duplex transfer:
//!
//! ```text
//!          byte 0              byte 1               byte 2
//! MOSI   0000 0 1 1 D2      D1 D0 xx xxxx         xxxx xxxx
//!               │ │ │        └─┴─ channel bits
//!               │ │ └── channel bit 2 (always 0 on the 4-channel part)
//!               │ └──── single-ended
//!               └────── start bit
//! MISO   ???? ????         ???0 B11..B8          B7 .. B0
//! ```
//!
//! The frame encoding is kept free of any bus type so it can be tested on
//! any host; the SPI reader itself needs the `raspberry-pi` feature.

use shindo_core::constants::ADC_MAX_VALUE;
use shindo_core::traits::Axis;

/// Start bit plus single-ended mode
const START_SINGLE_ENDED: u8 = 0x06;

/// Highest channel number the command format can address
pub const MAX_CHANNEL: u8 = 7;

/// Command bytes for a single-ended conversion on `channel`
pub const fn command_frame(channel: u8) -> [u8; 3] {
    let d2 = (channel >> 2) & 0x01;
    [START_SINGLE_ENDED | d2, (channel & 0x03) << 6, 0x00]
}

/// 12-bit sample from the bytes clocked back during [`command_frame`]
pub const fn decode_frame(rx: [u8; 3]) -> u16 {
    ((((rx[1] & 0x0f) as u16) << 8) | rx[2] as u16) & ADC_MAX_VALUE
}

/// Wiring of the three accelerometer outputs to ADC inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelMap {
    pub channels: [u8; 3],
}

impl ChannelMap {
    pub fn channel(&self, axis: Axis) -> u8 {
        self.channels[axis.index()]
    }
}

impl Default for ChannelMap {
    /// X on CH0, Y on CH1, Z on CH2
    fn default() -> Self {
        Self { channels: [0, 1, 2] }
    }
}

#[cfg(feature = "raspberry-pi")]
pub use self::spi::{Mcp3204Error, Mcp3204Reader, SpiSettings};

#[cfg(feature = "raspberry-pi")]
mod spi {
    use log::info;
    use rppal::spi::{Bus, Mode, SlaveSelect, Spi};
    use shindo_core::constants::sensors::SPI_CLOCK_HZ;
    use shindo_core::traits::{Axis, ChannelReader};
    use thiserror::Error;

    use super::{command_frame, decode_frame, ChannelMap, MAX_CHANNEL};

    /// MCP3204 errors
    #[derive(Debug, Error)]
    pub enum Mcp3204Error {
        /// Opening the SPI device failed
        #[error("Opening SPI{bus}.{slave_select}: {source}")]
        Open {
            bus: u8,
            slave_select: u8,
            #[source]
            source: rppal::spi::Error,
        },

        /// A transfer failed
        #[error("SPI transfer on channel {channel} failed: {source}")]
        Transfer {
            channel: u8,
            #[source]
            source: rppal::spi::Error,
        },

        /// Fewer bytes came back than were sent
        #[error("Short SPI transfer on channel {channel}: {len} of 3 bytes")]
        ShortTransfer { channel: u8, len: usize },

        /// Bus or chip select number not present on the board
        #[error("No such SPI device: SPI{bus}.{slave_select}")]
        NoSuchDevice { bus: u8, slave_select: u8 },

        /// Channel outside the addressable range
        #[error("Channel {0} is not addressable")]
        InvalidChannel(u8),
    }

    /// SPI device selection
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SpiSettings {
        pub bus: u8,
        pub slave_select: u8,
        pub clock_hz: u32,
        pub channels: ChannelMap,
    }

    impl Default for SpiSettings {
        fn default() -> Self {
            Self {
                bus: 0,
                slave_select: 0,
                clock_hz: SPI_CLOCK_HZ,
                channels: ChannelMap::default(),
            }
        }
    }

    /// Channel reader on a live MCP3204
    pub struct Mcp3204Reader {
        spi: Spi,
        channels: ChannelMap,
    }

    impl Mcp3204Reader {
        pub fn open(settings: SpiSettings) -> Result<Self, Mcp3204Error> {
            if let Some(&channel) = settings.channels.channels.iter().find(|&&c| c > MAX_CHANNEL) {
                return Err(Mcp3204Error::InvalidChannel(channel));
            }

            let no_such_device = Mcp3204Error::NoSuchDevice {
                bus: settings.bus,
                slave_select: settings.slave_select,
            };
            let bus = match settings.bus {
                0 => Bus::Spi0,
                1 => Bus::Spi1,
                2 => Bus::Spi2,
                _ => return Err(no_such_device),
            };
            let slave_select = match settings.slave_select {
                0 => SlaveSelect::Ss0,
                1 => SlaveSelect::Ss1,
                2 => SlaveSelect::Ss2,
                _ => return Err(no_such_device),
            };

            let spi = Spi::new(bus, slave_select, settings.clock_hz, Mode::Mode0).map_err(|source| {
                Mcp3204Error::Open {
                    bus: settings.bus,
                    slave_select: settings.slave_select,
                    source,
                }
            })?;

            info!(
                "MCP3204 on SPI{}.{} at {} Hz, channels {:?}",
                settings.bus, settings.slave_select, settings.clock_hz, settings.channels.channels
            );
            Ok(Self {
                spi,
                channels: settings.channels,
            })
        }

        /// One conversion on `channel`
        pub fn read_channel(&mut self, channel: u8) -> Result<u16, Mcp3204Error> {
            let tx = command_frame(channel);
            let mut rx = [0u8; 3];
            let len = self
                .spi
                .transfer(&mut rx, &tx)
                .map_err(|source| Mcp3204Error::Transfer { channel, source })?;
            if len < rx.len() {
                return Err(Mcp3204Error::ShortTransfer { channel, len });
            }
            Ok(decode_frame(rx))
        }
    }

    impl ChannelReader for Mcp3204Reader {
        type Error = Mcp3204Error;

        fn read_axis(&mut self, axis: Axis) -> nb::Result<u16, Self::Error> {
            let channel = self.channels.channel(axis);
            self.read_channel(channel).map_err(nb::Error::Other)
        }
    }
}
