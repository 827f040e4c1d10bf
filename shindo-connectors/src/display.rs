//! OLED Intensity Display
//!
//! Shows the published intensity on a 128x64 SSD1306 panel on the I2C bus,
//! next to the value file rather than instead of it. One line of text:
//!
//! ```text
//! Val : 3.4
//! ```
//!
//! Drawing is split from the panel: [`draw_value`] renders onto any
//! monochrome `embedded-graphics` target and builds on every host. The
//! panel driver behind the `display` feature only adds the I2C transfer.

use embedded_graphics::mono_font::ascii::FONT_10X20;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};

/// Text in front of the value
pub const LABEL: &str = "Val : ";

/// Top-left corner of the text on the panel
pub const TEXT_ORIGIN: Point = Point::new(15, 20);

/// Clear `target` and draw one line showing `value`
pub fn draw_value<D>(target: &mut D, value: &str) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let line = format!("{LABEL}{value}");

    target.clear(BinaryColor::Off)?;
    let style = MonoTextStyle::new(&FONT_10X20, BinaryColor::On);
    Text::with_baseline(&line, TEXT_ORIGIN, style, Baseline::Top).draw(target)?;
    Ok(())
}

#[cfg(feature = "display")]
pub use self::oled::{DisplayError, OledPublisher};

#[cfg(feature = "display")]
mod oled {
    use linux_embedded_hal::I2cdev;
    use log::{debug, info};
    use shindo_core::constants::intensity::RESET_VALUE;
    use shindo_core::traits::Publisher;
    use shindo_core::Intensity;
    use ssd1306::mode::BufferedGraphicsMode;
    use ssd1306::prelude::*;
    use ssd1306::{I2CDisplayInterface, Ssd1306};
    use thiserror::Error;

    use super::draw_value;

    type Panel = Ssd1306<I2CInterface<I2cdev>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

    /// Errors driving the panel
    #[derive(Debug, Error)]
    pub enum DisplayError {
        /// The I2C device could not be opened
        #[error("Opening {device}: {reason}")]
        Open { device: String, reason: String },

        /// The panel did not accept a command or the frame buffer
        #[error("Display on {device}: {reason}")]
        Bus { device: String, reason: String },
    }

    /// Publisher drawing the intensity on an SSD1306 panel
    pub struct OledPublisher {
        panel: Panel,
        device: String,
    }

    impl OledPublisher {
        /// Open and initialise the panel on `device`
        pub fn open(device: &str) -> Result<Self, DisplayError> {
            let i2c = I2cdev::new(device).map_err(|e| DisplayError::Open {
                device: device.to_string(),
                reason: e.to_string(),
            })?;

            let interface = I2CDisplayInterface::new(i2c);
            let mut panel = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
                .into_buffered_graphics_mode();
            panel.init().map_err(|e| DisplayError::Bus {
                device: device.to_string(),
                reason: format!("{e:?}"),
            })?;

            info!("OLED display on {}", device);
            Ok(Self { panel, device: device.to_string() })
        }

        pub fn device(&self) -> &str {
            &self.device
        }

        fn show(&mut self, value: &str) -> Result<(), DisplayError> {
            let drawn = draw_value(&mut self.panel, value).and_then(|()| self.panel.flush());
            drawn.map_err(|e| DisplayError::Bus {
                device: self.device.clone(),
                reason: format!("{e:?}"),
            })?;
            debug!("Displayed {:?}", value);
            Ok(())
        }
    }

    impl Publisher for OledPublisher {
        type Error = DisplayError;

        fn reset(&mut self) -> Result<(), Self::Error> {
            self.show(RESET_VALUE)
        }

        fn publish(&mut self, intensity: Intensity) -> Result<(), Self::Error> {
            self.show(intensity.render().as_str())
        }
    }
}
