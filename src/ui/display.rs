//! SSD1306 OLED display surface.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use sofle_status::config::{OLED_BATTERY_ROW_Y, OLED_BLUETOOTH_ROW_Y, OLED_LAYER_ROW_Y};
use sofle_status::widget::{DisplaySurface, Line, Region};
use sofle_status::Error;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Initialise the SSD1306 display and clear the screen.
pub fn init<I2C>(i2c: I2C) -> Result<Display<I2C>, Error>
where
    I2C: embedded_hal::i2c::I2c,
{
    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    display.init().map_err(|_| Error::Display)?;
    display.clear_buffer();
    display.flush().map_err(|_| Error::Display)?;
    Ok(display)
}

fn text_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::On)
        .build()
}

/// Three stacked text rows on the panel: layer, bluetooth, battery.
///
/// `set_text` only updates the row buffers. `commit` redraws the frame
/// and flushes it in one I²C transfer.
pub struct OledSurface<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    display: Display<I2C>,
    layer: Line,
    bluetooth: Line,
    battery: Line,
}

impl<I2C> OledSurface<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    pub fn new(display: Display<I2C>) -> Self {
        Self {
            display,
            layer: Line::new(),
            bluetooth: Line::new(),
            battery: Line::new(),
        }
    }
}

impl<I2C> DisplaySurface for OledSurface<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn set_text(&mut self, region: Region, text: &str) -> Result<(), Error> {
        let row = match region {
            Region::Layer => &mut self.layer,
            Region::Battery => &mut self.battery,
            Region::Bluetooth => &mut self.bluetooth,
        };
        row.clear();
        for c in text.chars() {
            if row.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }

    fn commit(&mut self) -> Result<(), Error> {
        self.display.clear_buffer();

        let rows = [
            (OLED_LAYER_ROW_Y, &self.layer),
            (OLED_BLUETOOTH_ROW_Y, &self.bluetooth),
            (OLED_BATTERY_ROW_Y, &self.battery),
        ];
        for (y, row) in rows {
            Text::with_baseline(row.as_str(), Point::new(0, y), text_style(), Baseline::Top)
                .draw(&mut self.display)
                .map_err(|_| Error::Display)?;
        }

        self.display.flush().map_err(|_| Error::Display)
    }
}

impl<I2C> Drop for OledSurface<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Blank the panel when the surface is torn down.
    fn drop(&mut self) {
        self.display.clear_buffer();
        let _ = self.display.flush();
    }
}
