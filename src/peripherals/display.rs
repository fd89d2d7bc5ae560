//! Display control module for PineTime

use embassy_nrf::{
    gpio::{AnyPin, Output},
    peripherals::SPI2,
    spim::Spim,
};
use embassy_time::Delay;

use circular_watchface::{
    clock::TimeSource,
    engine::Engine,
    ui::{FaceGeometry, ScreenShape, WatchFace},
};
use display_interface_spi::SPIInterface;
use embedded_graphics::{pixelcolor::Rgb565, prelude::*};
use mipidsi::{models::ST7789, Builder, Orientation};

pub const LCD_W: u16 = 240;
pub const LCD_H: u16 = 240;

type Lcd = mipidsi::Display<
    SPIInterface<Spim<'static, SPI2>, Output<'static, AnyPin>, Output<'static, AnyPin>>,
    ST7789,
    Output<'static, AnyPin>,
>;

#[derive(Debug, Clone, Copy, defmt::Format)]
pub enum DisplayError {
    Init,
    Draw,
}

/// ST7789 panel of the PineTime
pub struct Display {
    lcd: Lcd,
}

impl Display {
    /// Configure display settings on boot
    pub fn init(
        spim: Spim<'static, SPI2>,
        cs: Output<'static, AnyPin>,
        dc: Output<'static, AnyPin>,
        rst: Output<'static, AnyPin>,
    ) -> Result<Self, DisplayError> {
        let lcd = Builder::st7789(SPIInterface::new(spim, dc, cs))
            .with_display_size(LCD_W, LCD_H)
            .with_orientation(Orientation::Portrait(false))
            .init(&mut Delay, Some(rst))
            .map_err(|_| DisplayError::Init)?;

        let mut display = Self { lcd };
        display.clear()?;
        Ok(display)
    }

    /// The panel is a plain square without insets
    pub fn geometry(&self) -> FaceGeometry {
        FaceGeometry::new(LCD_W.into(), LCD_H.into(), ScreenShape::Rectangular, 0)
    }

    /// Clear the display
    pub fn clear(&mut self) -> Result<(), DisplayError> {
        self.lcd.clear(Rgb565::BLACK).map_err(|_| DisplayError::Draw)
    }

    /// Draw the current state of the watch face
    pub fn render<F, T>(&mut self, engine: &Engine<F, T>) -> Result<(), DisplayError>
    where
        F: WatchFace,
        T: TimeSource,
    {
        engine.on_draw(&mut self.lcd).map_err(|_| DisplayError::Draw)
    }
}
