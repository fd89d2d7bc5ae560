//! UI definitions module
//! Based on: https://github.com/lupyuen/pinetime-watchface/blob/master/src/lib.rs

use embedded_graphics::{draw_target::DrawTarget, pixelcolor::Rgb565};

pub mod circular_watchface;
pub mod geometry;
pub mod palette;

pub use circular_watchface::CircularWatchface;
pub use geometry::{FaceGeometry, HourFormat, ScreenShape};
pub use palette::{DayBand, Palette};

pub trait WatchFace {
    /// Draw the complete face for the given state
    fn draw<D>(&self, target: &mut D, state: &WatchFaceState) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>;
}

/// State for the watch face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchFaceState {
    /// Local hour of the day (0–23)
    pub hour: u32,
    /// Local minute of the hour (0–59)
    pub minute: u32,
    pub ambient: bool,
    /// Cleared on low-bit displays while ambient
    pub anti_alias: bool,
    pub geometry: FaceGeometry,
}
