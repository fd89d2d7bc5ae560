//! Circular watchface
//!
//! A ring that fills up over the hour, six degrees per minute, around the
//! current hour in the middle of the screen. Ring and hour take the color of
//! the part of the day.

use embedded_graphics::{
    geometry::Angle,
    mono_font::MonoTextStyle,
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Arc, PrimitiveStyle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};

use super::{
    geometry::{hour_digit, sweep_angle, ARC_START_DEGREES},
    DayBand, HourFormat, WatchFace, WatchFaceState,
};
use crate::{config::WatchFaceConfig, Error};

/// Room for the hour digits
const BUF_LEN: usize = 4;

/// Minute arc with the hour in its center
pub struct CircularWatchface {
    config: WatchFaceConfig,
}

impl CircularWatchface {
    /// Create new watchface
    pub fn new(config: &WatchFaceConfig) -> Self {
        Self { config: *config }
    }

    /// Color of both arc and hour
    pub fn color(&self, state: &WatchFaceState) -> Rgb565 {
        let palette = &self.config.palette;
        if state.anti_alias {
            palette.color(DayBand::from_hour(state.hour))
        } else {
            palette.ambient
        }
    }
}

/// Format the hour digits into `buf`
pub fn hour_label(buf: &mut [u8; BUF_LEN], hour: u32, format: HourFormat) -> Result<&str, Error> {
    format_no_std::show(buf, format_args!("{}", hour_digit(hour, format))).map_err(|_| Error::Format)
}

impl WatchFace for CircularWatchface {
    fn draw<D>(&self, target: &mut D, state: &WatchFaceState) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        target.clear(self.config.palette.background)?;
        let color = self.color(state);

        if let Some((top_left, diameter)) = state.geometry.arc_frame(self.config.rect_margin) {
            Arc::new(
                top_left,
                diameter,
                Angle::from_degrees(ARC_START_DEGREES),
                Angle::from_degrees(sweep_angle(state.minute) as f32),
            )
            .into_styled(PrimitiveStyle::with_stroke(color, self.config.stroke_width))
            .draw(target)?;
        }

        let mut buf = [0u8; BUF_LEN];
        match hour_label(&mut buf, state.hour, self.config.hour_format) {
            Ok(label) => {
                let font = self.config.font_for(state.geometry.shape());
                let character_style = MonoTextStyle::new(font, color);
                let text_style = TextStyleBuilder::new()
                    .alignment(Alignment::Center)
                    .baseline(Baseline::Middle)
                    .build();
                Text::with_text_style(
                    label,
                    state.geometry.center(),
                    character_style,
                    text_style,
                )
                .draw(target)?;
            }
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Hour label skipped: {}", _e);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::{
        mock_display::MockDisplay,
        mono_font::ascii::FONT_6X10,
        pixelcolor::{Rgb565, RgbColor},
    };

    use super::*;
    use crate::ui::{FaceGeometry, Palette, ScreenShape};

    const SIZE: i32 = 64;

    fn face(format: HourFormat) -> CircularWatchface {
        let config = WatchFaceConfig::default()
            .with_hour_format(format)
            .with_rect_margin(4)
            .with_stroke_width(3)
            .with_fonts(&FONT_6X10, &FONT_6X10);
        CircularWatchface::new(&config)
    }

    fn state(hour: u32, minute: u32) -> WatchFaceState {
        WatchFaceState {
            hour,
            minute,
            ambient: false,
            anti_alias: true,
            geometry: FaceGeometry::new(SIZE as u32, SIZE as u32, ScreenShape::Rectangular, 0),
        }
    }

    fn render(face: &CircularWatchface, state: &WatchFaceState) -> MockDisplay<Rgb565> {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        display.set_allow_out_of_bounds_drawing(true);
        face.draw(&mut display, state).unwrap();
        display
    }

    /// Pixels of `color` inside the given rows and columns
    fn count(
        display: &MockDisplay<Rgb565>,
        color: Rgb565,
        xs: core::ops::Range<i32>,
        ys: core::ops::Range<i32>,
    ) -> usize {
        let mut n = 0;
        for y in ys {
            for x in xs.clone() {
                if display.get_pixel(Point::new(x, y)) == Some(color) {
                    n += 1;
                }
            }
        }
        n
    }

    #[test]
    fn quarter_hour_stays_in_upper_half() {
        let face = face(HourFormat::H24);
        let state = state(9, 15);
        let display = render(&face, &state);
        let color = face.color(&state);

        assert!(count(&display, color, 0..SIZE, 0..28) > 0);
        assert_eq!(count(&display, color, 0..SIZE, 40..SIZE), 0);
    }

    #[test]
    fn quarter_hour_sweeps_clockwise_from_twelve() {
        let face = face(HourFormat::H24);
        let state = state(9, 15);
        let display = render(&face, &state);
        let color = face.color(&state);

        assert!(count(&display, color, 40..SIZE, 0..SIZE / 2) > 0);
        assert_eq!(count(&display, color, 0..26, 0..SIZE), 0);
    }

    #[test]
    fn three_quarters_reach_lower_half() {
        let face = face(HourFormat::H24);
        let state = state(9, 45);
        let display = render(&face, &state);
        let color = face.color(&state);

        assert!(count(&display, color, 0..SIZE, 40..SIZE) > 0);
    }

    #[test]
    fn top_of_hour_draws_full_ring() {
        let face = face(HourFormat::H24);
        let state = state(9, 0);
        let display = render(&face, &state);
        let color = face.color(&state);

        let half = SIZE / 2;
        assert!(count(&display, color, 0..half, 0..20) > 0);
        assert!(count(&display, color, half..SIZE, 0..20) > 0);
        assert!(count(&display, color, 0..half, 44..SIZE) > 0);
        assert!(count(&display, color, half..SIZE, 44..SIZE) > 0);
    }

    #[test]
    fn hour_is_drawn_in_center() {
        let face = face(HourFormat::H24);
        let state = state(9, 15);
        let display = render(&face, &state);
        let color = face.color(&state);

        assert!(count(&display, color, 26..38, 25..39) > 0);
    }

    #[test]
    fn colors_follow_day_band() {
        let face = face(HourFormat::H24);
        let palette = Palette::default();

        for (hour, expected, others) in [
            (8, palette.dawn, [palette.afternoon, palette.night]),
            (15, palette.afternoon, [palette.dawn, palette.night]),
            (22, palette.night, [palette.dawn, palette.afternoon]),
        ] {
            let display = render(&face, &state(hour, 30));
            assert!(count(&display, expected, 0..SIZE, 0..SIZE) > 0);
            for other in others {
                assert_eq!(count(&display, other, 0..SIZE, 0..SIZE), 0);
            }
        }
    }

    #[test]
    fn low_bit_ambient_uses_single_color() {
        let face = face(HourFormat::H24);
        let mut state = state(15, 30);
        state.ambient = true;
        state.anti_alias = false;
        let display = render(&face, &state);

        assert!(count(&display, Rgb565::WHITE, 0..SIZE, 0..SIZE) > 0);
        for y in 0..SIZE {
            for x in 0..SIZE {
                let pixel = display.get_pixel(Point::new(x, y));
                assert!(matches!(pixel, Some(Rgb565::WHITE) | Some(Rgb565::BLACK)));
            }
        }
    }

    #[test]
    fn ambient_keeps_band_color_without_low_bit() {
        let face = face(HourFormat::H24);
        let mut state = state(15, 30);
        state.ambient = true;
        assert_eq!(face.color(&state), Palette::default().afternoon);
    }

    #[test]
    fn no_arc_when_margins_fill_screen() {
        let config = WatchFaceConfig::default()
            .with_rect_margin(40)
            .with_fonts(&FONT_6X10, &FONT_6X10);
        let face = CircularWatchface::new(&config);
        let state = state(9, 0);
        let display = render(&face, &state);
        let color = face.color(&state);

        // Only the hour remains
        assert_eq!(count(&display, color, 0..SIZE, 0..20), 0);
        assert!(count(&display, color, 26..38, 25..39) > 0);
    }

    #[test]
    fn hour_labels() {
        let mut buf = [0u8; BUF_LEN];
        assert_eq!(hour_label(&mut buf, 21, HourFormat::H24), Ok("21"));
        assert_eq!(hour_label(&mut buf, 21, HourFormat::H12), Ok("9"));
        assert_eq!(hour_label(&mut buf, 12, HourFormat::H12), Ok("0"));
    }
}
