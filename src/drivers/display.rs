// NVH Monitor — SH1106 OLED Driver
//
// Register-level driver over the shared I2C bus. Drawing goes into a local
// 1 KiB frame buffer through embedded-graphics; `flush` pushes it out one
// 8-row page at a time.

use core::convert::Infallible;

use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};
use nvh_core::{Error, StatusDisplay};

use crate::config::*;
use crate::drivers::{lock, SharedBus};

const CONTROL_COMMAND: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

const INIT_SEQUENCE: &[u8] = &[
    CONTROL_COMMAND,
    0xAE,       // display off
    0xD5, 0x80, // clock divide
    0xA8, 0x3F, // multiplex 64
    0xD3, 0x00, // display offset
    0x40,       // start line 0
    0xAD, 0x8B, // DC-DC on
    0xA1,       // segment remap
    0xC8,       // COM scan descending
    0xDA, 0x12, // COM pins
    0x81, 0xCF, // contrast
    0xD9, 0x22, // pre-charge
    0xDB, 0x40, // VCOM detect
    0xA4,       // resume from RAM
    0xA6,       // normal (not inverted)
    0xAF,       // display on
];

pub struct OledDisplay {
    bus: SharedBus,
    buffer: [u8; DISPLAY_BUFFER_SIZE],
}

impl OledDisplay {
    pub fn new(bus: SharedBus) -> Self {
        Self {
            bus,
            buffer: [0; DISPLAY_BUFFER_SIZE],
        }
    }

    /// Probe with a NOP command.
    pub fn is_connected(&self) -> bool {
        lock(self.bus)
            .and_then(|mut bus| {
                bus.write(I2C_ADDR_OLED, &[CONTROL_COMMAND, 0xE3], I2C_TIMEOUT_TICKS)
                    .map_err(Into::into)
            })
            .is_ok()
    }

    pub fn init(&mut self) -> anyhow::Result<()> {
        lock(self.bus)?.write(I2C_ADDR_OLED, INIT_SEQUENCE, I2C_TIMEOUT_TICKS)?;
        self.buffer.fill(0);
        self.flush_buffer()?;
        log::info!("SH1106 initialised ({}x{})", SCREEN_WIDTH, SCREEN_HEIGHT);
        Ok(())
    }

    fn flush_buffer(&self) -> anyhow::Result<()> {
        let mut bus = lock(self.bus)?;
        let mut data = [0u8; SCREEN_WIDTH as usize + 1];
        data[0] = CONTROL_DATA;

        for (page, row) in self.buffer.chunks(SCREEN_WIDTH as usize).enumerate() {
            let address = [
                CONTROL_COMMAND,
                0xB0 | page as u8,
                SH1106_COLUMN_OFFSET & 0x0F,
                0x10 | (SH1106_COLUMN_OFFSET >> 4),
            ];
            bus.write(I2C_ADDR_OLED, &address, I2C_TIMEOUT_TICKS)?;
            data[1..].copy_from_slice(row);
            bus.write(I2C_ADDR_OLED, &data, I2C_TIMEOUT_TICKS)?;
        }
        Ok(())
    }
}

impl OriginDimensions for OledDisplay {
    fn size(&self) -> Size {
        Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

impl DrawTarget for OledDisplay {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (u32::try_from(point.x), u32::try_from(point.y)) else {
                continue;
            };
            if x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT {
                continue;
            }
            let index = (x + (y / 8) * SCREEN_WIDTH) as usize;
            let mask = 1u8 << (y % 8);
            match color {
                BinaryColor::On => self.buffer[index] |= mask,
                BinaryColor::Off => self.buffer[index] &= !mask,
            }
        }
        Ok(())
    }
}

impl StatusDisplay for OledDisplay {
    fn clear(&mut self) -> nvh_core::Result<()> {
        self.buffer.fill(0);
        Ok(())
    }

    fn draw_text(&mut self, row: i32, col: i32, text: &str) -> nvh_core::Result<()> {
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        Text::with_baseline(text, Point::new(col, row), style, Baseline::Top)
            .draw(self)
            .map(drop)
            .map_err(|e: Infallible| match e {})
    }

    fn flush(&mut self) -> nvh_core::Result<()> {
        self.flush_buffer()
            .map_err(|e| Error::PeripheralUnavailable(format!("OLED: {e}")))
    }
}
