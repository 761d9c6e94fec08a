//! SSD1306 OLED status display
//!
//! Driver for 128x64 SSD1306-based OLED displays via I2C. Text is drawn
//! with `embedded-graphics` into a page-organised frame buffer, then the
//! whole buffer is written out.

use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};
use embedded_hal::i2c::I2c;
use parkgate_core::traits::Display;

/// Default SSD1306 I2C address (0x3D with SA0 high)
pub const SSD1306_ADDR: u8 = 0x3C;

/// Display dimensions
const WIDTH: usize = 128;
const HEIGHT: usize = 64;
const PAGES: usize = HEIGHT / 8;

/// Baseline of the status line
const TEXT_BASELINE_Y: i32 = 16;

/// Control bytes
const CONTROL_COMMAND: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

/// SSD1306 commands
#[allow(dead_code)]
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const RESUME_RAM: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// SSD1306 status display
pub struct Ssd1306Display<I2C> {
    i2c: I2C,
    address: u8,
    /// Frame buffer (1 bit per pixel, organized as pages)
    buffer: [[u8; WIDTH]; PAGES],
    initialized: bool,
    failed_updates: u32,
}

impl<I2C: I2c> Ssd1306Display<I2C> {
    /// Create a driver at the default address
    ///
    /// The panel is initialised by [`init`](Self::init) or lazily on the
    /// first `show`.
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, SSD1306_ADDR)
    }

    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            buffer: [[0; WIDTH]; PAGES],
            initialized: false,
            failed_updates: 0,
        }
    }

    /// Initialize the display
    pub fn init(&mut self) -> Result<(), I2C::Error> {
        let init_cmds: &[u8] = &[
            cmd::DISPLAY_OFF,
            cmd::SET_CLOCK_DIV,
            0x80, // Default clock
            cmd::SET_MUX_RATIO,
            0x3F, // 64 lines
            cmd::SET_DISPLAY_OFFSET,
            0x00,
            cmd::SET_START_LINE,
            cmd::SET_CHARGE_PUMP,
            0x14, // Enable charge pump
            cmd::SET_MEMORY_MODE,
            0x02,                  // Page addressing
            cmd::SET_SEG_REMAP,    // Flip horizontally
            cmd::SET_COM_SCAN_DEC, // Flip vertically
            cmd::SET_COM_PINS,
            0x12, // Alternative COM config
            cmd::SET_CONTRAST,
            0xCF,
            cmd::SET_PRECHARGE,
            0xF1,
            cmd::SET_VCOM_DETECT,
            0x40,
            cmd::RESUME_RAM,
            cmd::SET_NORMAL,
            cmd::DISPLAY_ON,
        ];

        for &c in init_cmds {
            self.command(c)?;
        }

        self.initialized = true;
        Ok(())
    }

    /// Draw `text` as the only content of the frame buffer
    pub fn render(&mut self, text: &str) {
        self.clear_buffer();
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        // Drawing into the buffer cannot fail
        let _ = Text::with_baseline(text, Point::new(0, TEXT_BASELINE_Y), style, Baseline::Alphabetic)
            .draw(self);
    }

    /// Write the frame buffer to the panel
    pub fn flush(&mut self) -> Result<(), I2C::Error> {
        for page in 0..PAGES {
            self.command(cmd::SET_PAGE_ADDR | page as u8)?;
            self.command(cmd::SET_LOW_COLUMN)?;
            self.command(cmd::SET_HIGH_COLUMN)?;

            let mut data = [0u8; WIDTH + 1];
            data[0] = CONTROL_DATA;
            data[1..].copy_from_slice(&self.buffer[page]);
            self.i2c.write(self.address, &data)?;
        }

        Ok(())
    }

    /// Number of `show` calls whose bus transfer failed
    pub fn failed_updates(&self) -> u32 {
        self.failed_updates
    }

    pub fn release(self) -> I2C {
        self.i2c
    }

    fn clear_buffer(&mut self) {
        for page in self.buffer.iter_mut() {
            page.fill(0);
        }
    }

    fn command(&mut self, c: u8) -> Result<(), I2C::Error> {
        self.i2c.write(self.address, &[CONTROL_COMMAND, c])
    }

    fn refresh(&mut self) -> Result<(), I2C::Error> {
        if !self.initialized {
            self.init()?;
        }
        self.flush()
    }
}

impl<I2C> OriginDimensions for Ssd1306Display<I2C> {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl<I2C> DrawTarget for Ssd1306Display<I2C> {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) else {
                continue;
            };
            if x >= WIDTH || y >= HEIGHT {
                continue;
            }
            let bit = 1 << (y % 8);
            let byte = &mut self.buffer[y / 8][x];
            if color.is_on() {
                *byte |= bit;
            } else {
                *byte &= !bit;
            }
        }
        Ok(())
    }
}

impl<I2C: I2c> Display for Ssd1306Display<I2C> {
    fn show(&mut self, text: &str) {
        self.render(text);
        if self.refresh().is_err() {
            // Retried implicitly by the next show
            self.initialized = false;
            self.failed_updates = self.failed_updates.wrapping_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, Operation};

    /// Mock I2C bus that records writes
    #[derive(Default)]
    struct MockI2c {
        writes: Vec<(u8, Vec<u8>)>,
        fail: bool,
    }

    impl ErrorType for MockI2c {
        type Error = ErrorKind;
    }

    impl I2c for MockI2c {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if self.fail {
                return Err(ErrorKind::Other);
            }
            for op in operations {
                if let Operation::Write(bytes) = op {
                    self.writes.push((address, bytes.to_vec()));
                }
            }
            Ok(())
        }
    }

    fn lit_pixels(page: &[u8; WIDTH]) -> u32 {
        page.iter().map(|b| b.count_ones()).sum()
    }

    #[test]
    fn test_render_draws_on_status_line() {
        let mut display = Ssd1306Display::new(MockI2c::default());
        display.render("Ready");

        // 6x10 glyphs with baseline at y=16 cover rows 8..18
        assert_eq!(lit_pixels(&display.buffer[0]), 0);
        assert!(lit_pixels(&display.buffer[1]) + lit_pixels(&display.buffer[2]) > 0);
        for page in &display.buffer[3..] {
            assert_eq!(lit_pixels(page), 0);
        }
    }

    #[test]
    fn test_render_replaces_previous_text() {
        let mut display = Ssd1306Display::new(MockI2c::default());
        display.render("Spaces Available");
        display.render("");
        for page in &display.buffer {
            assert_eq!(lit_pixels(page), 0);
        }
    }

    #[test]
    fn test_long_text_is_clipped() {
        let mut display = Ssd1306Display::new(MockI2c::default());
        display.render("ABCDEFGHIJKLMNOPQRSTUVWXYZ0123");
        assert!(lit_pixels(&display.buffer[1]) > 0);
    }

    #[test]
    fn test_show_initializes_then_flushes() {
        let mut display = Ssd1306Display::new(MockI2c::default());
        display.show("Ready");

        let i2c = display.release();
        assert!(i2c.writes.iter().all(|(addr, _)| *addr == SSD1306_ADDR));
        assert_eq!(i2c.writes[0].1, vec![CONTROL_COMMAND, cmd::DISPLAY_OFF]);

        let data_writes: Vec<_> = i2c
            .writes
            .iter()
            .filter(|(_, bytes)| bytes[0] == CONTROL_DATA)
            .collect();
        assert_eq!(data_writes.len(), PAGES);
        assert!(data_writes.iter().all(|(_, bytes)| bytes.len() == WIDTH + 1));
    }

    #[test]
    fn test_second_show_skips_init() {
        let mut display = Ssd1306Display::new(MockI2c::default());
        display.show("Ready");
        let first = display.i2c.writes.len();
        display.show("Lot Full");
        // Only page address commands and data this time
        assert_eq!(display.i2c.writes.len() - first, PAGES * 4);
    }

    #[test]
    fn test_bus_errors_are_swallowed() {
        let mut display = Ssd1306Display::new(MockI2c {
            fail: true,
            ..Default::default()
        });
        display.show("Ready");
        display.show("Ready");
        assert_eq!(display.failed_updates(), 2);

        display.i2c.fail = false;
        display.show("Ready");
        assert_eq!(display.failed_updates(), 2);
        assert!(display.initialized);
    }

    #[test]
    fn test_custom_address() {
        let mut display = Ssd1306Display::with_address(MockI2c::default(), 0x3D);
        display.init().unwrap();
        assert!(display.i2c.writes.iter().all(|(addr, _)| *addr == 0x3D));
    }
}
