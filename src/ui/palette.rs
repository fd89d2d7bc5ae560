//! Time-of-day colors

use embedded_graphics::pixelcolor::{Rgb565, RgbColor, WebColors};

/// Part of the day the current hour falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DayBand {
    /// 06:00 to 12:59
    Dawn,
    /// 13:00 to 17:59
    Afternoon,
    /// 18:00 to 05:59
    Night,
}

impl DayBand {
    /// Band for an hour of the day (0–23)
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=12 => DayBand::Dawn,
            13..=17 => DayBand::Afternoon,
            _ => DayBand::Night,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub dawn: Rgb565,
    pub afternoon: Rgb565,
    pub night: Rgb565,
    pub background: Rgb565,
    /// Single color used on low-bit displays in ambient mode
    pub ambient: Rgb565,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            dawn: Rgb565::CSS_GOLD,
            afternoon: Rgb565::CSS_DARK_ORANGE,
            night: Rgb565::CSS_DEEP_SKY_BLUE,
            background: Rgb565::BLACK,
            ambient: Rgb565::WHITE,
        }
    }
}

impl Palette {
    pub fn color(&self, band: DayBand) -> Rgb565 {
        match band {
            DayBand::Dawn => self.dawn,
            DayBand::Afternoon => self.afternoon,
            DayBand::Night => self.night,
        }
    }
}
