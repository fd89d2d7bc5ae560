//! Watch face configuration

use core::time::Duration;

use chrono::{FixedOffset, Offset, Utc};
use embedded_graphics::mono_font::MonoFont;
use profont::{PROFONT_18_POINT, PROFONT_24_POINT};

use crate::{
    ui::{geometry::ScreenShape, HourFormat, Palette},
    Error,
};

/// Largest accepted distance from UTC, in seconds
const MAX_UTC_OFFSET: i32 = 24 * 3_600;

#[derive(Clone, Copy)]
pub struct WatchFaceConfig {
    pub hour_format: HourFormat,
    pub palette: Palette,
    /// Width of the minute arc in pixels
    pub stroke_width: u32,
    /// Arc inset on rectangular screens
    pub rect_margin: u32,
    /// Hour font on rectangular screens
    pub font: &'static MonoFont<'static>,
    /// Hour font on round screens
    pub font_round: &'static MonoFont<'static>,
    /// Redraw period while interactive, aligned to multiples since the epoch
    pub update_interval: Duration,
    /// Time zone until the device reports one
    pub utc_offset: FixedOffset,
}

impl Default for WatchFaceConfig {
    fn default() -> Self {
        Self {
            hour_format: HourFormat::H24,
            palette: Palette::default(),
            stroke_width: 5,
            rect_margin: 40,
            font: &PROFONT_18_POINT,
            font_round: &PROFONT_24_POINT,
            update_interval: Duration::from_secs(60),
            utc_offset: Utc.fix(),
        }
    }
}

impl WatchFaceConfig {
    pub fn with_hour_format(mut self, hour_format: HourFormat) -> Self {
        self.hour_format = hour_format;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_stroke_width(mut self, stroke_width: u32) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    pub fn with_rect_margin(mut self, rect_margin: u32) -> Self {
        self.rect_margin = rect_margin;
        self
    }

    pub fn with_fonts(
        mut self,
        font: &'static MonoFont<'static>,
        font_round: &'static MonoFont<'static>,
    ) -> Self {
        self.font = font;
        self.font_round = font_round;
        self
    }

    /// Set the initial time zone, east of UTC in seconds
    pub fn with_utc_offset(mut self, seconds: i32) -> Result<Self, Error> {
        if !(-MAX_UTC_OFFSET..MAX_UTC_OFFSET).contains(&seconds) {
            return Err(Error::InvalidUtcOffset);
        }
        self.utc_offset = FixedOffset::east_opt(seconds).ok_or(Error::InvalidUtcOffset)?;
        Ok(self)
    }

    pub fn with_update_interval(mut self, interval: Duration) -> Result<Self, Error> {
        if interval.is_zero() {
            return Err(Error::InvalidInterval);
        }
        self.update_interval = interval;
        Ok(self)
    }

    /// Hour font for a screen shape
    pub fn font_for(&self, shape: ScreenShape) -> &'static MonoFont<'static> {
        match shape {
            ScreenShape::Round => self.font_round,
            ScreenShape::Rectangular => self.font,
        }
    }
}
