//! Backlight control
//!
//! Implementation based upon https://github.com/dbrgn/pinetime-rtic/blob/master/pinetime-rtic/src/backlight.rs
//! and https://wiki.pine64.org/wiki/PineTime.

use embassy_nrf::gpio::{AnyPin, Output};

/// Control the backlight.
///
/// There are three active-low backlight pins, each connected to a FET that
/// toggles backlight power through a resistor.
///
/// - Low: 2.2 kΩ
/// - Mid: 100 Ω
/// - High: 30 Ω
///
/// Through combinations of these pins, 7 brightness levels (+ off) can be
/// configured. The watch face follows the power state: full level while
/// interactive, dimmed while ambient and off while hidden.
pub struct Backlight {
    low: Output<'static, AnyPin>,
    mid: Output<'static, AnyPin>,
    high: Output<'static, AnyPin>,

    /// The current brightness level (value between 0 and 7).
    brightness: u8,
}

impl Backlight {
    /// Initialize the backlight with the specified level (0–7).
    pub fn init(
        low: Output<'static, AnyPin>,
        mid: Output<'static, AnyPin>,
        high: Output<'static, AnyPin>,
        brightness: u8,
    ) -> Self {
        let mut backlight = Self {
            low,
            mid,
            high,
            brightness,
        };
        backlight.write(brightness.min(7));
        backlight
    }

    /// Set the brightness level. Must be a value between 0 (off) and 7 (max
    /// brightness). Higher values are clamped to 7.
    pub fn set(&mut self, brightness: u8) {
        let brightness = brightness.min(7);
        if brightness != self.brightness {
            self.write(brightness);
        }
    }

    fn write(&mut self, brightness: u8) {
        defmt::debug!("Setting backlight brightness to {}", brightness);

        // Active low: a set bit pulls its pin down
        for (bit, pin) in [&mut self.low, &mut self.mid, &mut self.high]
            .into_iter()
            .enumerate()
        {
            if brightness & (1 << bit) > 0 {
                pin.set_low();
            } else {
                pin.set_high();
            }
        }
        self.brightness = brightness;
    }
}
