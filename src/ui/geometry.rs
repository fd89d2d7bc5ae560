//! Screen geometry and the time-to-shape mapping

use embedded_graphics::{
    geometry::{Point, Size},
    primitives::Rectangle,
};

/// Degrees of arc per elapsed minute
pub const DEGREES_PER_MINUTE: u32 = 6;

/// Angle at which the minute arc starts (12 o'clock)
pub const ARC_START_DEGREES: f32 = -90.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScreenShape {
    Round,
    Rectangular,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HourFormat {
    /// Hours 0 to 11
    H12,
    /// Hours 0 to 23
    H24,
}

/// Surface bounds, shape and insets as reported by the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceGeometry {
    bounds: Rectangle,
    shape: ScreenShape,
    /// Bottom inset of round screens with a flat "chin"
    chin: u32,
}

impl Default for FaceGeometry {
    fn default() -> Self {
        Self {
            bounds: Rectangle::zero(),
            shape: ScreenShape::Rectangular,
            chin: 0,
        }
    }
}

impl FaceGeometry {
    pub fn new(width: u32, height: u32, shape: ScreenShape, chin: u32) -> Self {
        Self {
            bounds: Rectangle::new(Point::zero(), Size::new(width, height)),
            shape,
            chin,
        }
    }

    /// Surface was resized
    pub fn on_surface_changed(&mut self, width: u32, height: u32) {
        self.bounds = Rectangle::new(Point::zero(), Size::new(width, height));
    }

    /// Screen shape and insets became known
    pub fn on_insets(&mut self, shape: ScreenShape, chin: u32) {
        self.shape = shape;
        self.chin = chin;
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    pub fn shape(&self) -> ScreenShape {
        self.shape
    }

    pub fn chin(&self) -> u32 {
        self.chin
    }

    /// Center of the whole surface.
    ///
    /// Insets are ignored so that round screens with a chin keep the face
    /// centered on the full display, not on the usable part of it.
    pub fn center(&self) -> Point {
        let size = self.bounds.size;
        self.bounds.top_left + Point::new(size.width as i32 / 2, size.height as i32 / 2)
    }

    /// Top-left corner and diameter of the minute arc.
    ///
    /// Round screens inset the arc by the chin, rectangular ones by `rect_margin`.
    /// Returns `None` when the insets leave no room.
    pub fn arc_frame(&self, rect_margin: u32) -> Option<(Point, u32)> {
        let inset = match self.shape {
            ScreenShape::Round => self.chin,
            ScreenShape::Rectangular => rect_margin,
        };
        let both_sides = inset.checked_mul(2)?;
        let width = self.bounds.size.width.checked_sub(both_sides)?;
        let height = self.bounds.size.height.checked_sub(both_sides)?;
        let diameter = width.min(height);
        if diameter == 0 {
            return None;
        }

        let top_left = self.bounds.top_left
            + Point::new(
                (inset + (width - diameter) / 2) as i32,
                (inset + (height - diameter) / 2) as i32,
            );
        Some((top_left, diameter))
    }
}

/// Arc length in degrees for the minute of the hour.
///
/// Minute 0 draws the complete ring rather than nothing.
pub fn sweep_angle(minute: u32) -> u32 {
    match minute % 60 {
        0 => 360,
        m => m * DEGREES_PER_MINUTE,
    }
}

/// Number shown in the middle of the face for an hour of the day (0–23)
pub fn hour_digit(hour: u32, format: HourFormat) -> u32 {
    match format {
        HourFormat::H24 => hour % 24,
        HourFormat::H12 => hour % 12,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_is_six_degrees_per_minute() {
        assert_eq!(sweep_angle(1), 6);
        assert_eq!(sweep_angle(15), 90);
        assert_eq!(sweep_angle(30), 180);
        assert_eq!(sweep_angle(59), 354);
    }

    #[test]
    fn sweep_at_top_of_hour_is_full_circle() {
        assert_eq!(sweep_angle(0), 360);
    }

    #[test]
    fn hour_digits() {
        assert_eq!(hour_digit(0, HourFormat::H24), 0);
        assert_eq!(hour_digit(13, HourFormat::H24), 13);
        assert_eq!(hour_digit(23, HourFormat::H24), 23);

        assert_eq!(hour_digit(0, HourFormat::H12), 0);
        assert_eq!(hour_digit(9, HourFormat::H12), 9);
        assert_eq!(hour_digit(12, HourFormat::H12), 0);
        assert_eq!(hour_digit(21, HourFormat::H12), 9);
    }

    #[test]
    fn center_ignores_chin() {
        let geometry = FaceGeometry::new(240, 240, ScreenShape::Round, 30);
        assert_eq!(geometry.center(), Point::new(120, 120));
    }

    #[test]
    fn round_arc_is_inset_by_chin() {
        let geometry = FaceGeometry::new(240, 240, ScreenShape::Round, 30);
        assert_eq!(geometry.arc_frame(40), Some((Point::new(30, 30), 180)));

        let geometry = FaceGeometry::new(240, 240, ScreenShape::Round, 0);
        assert_eq!(geometry.arc_frame(40), Some((Point::zero(), 240)));
    }

    #[test]
    fn rectangular_arc_uses_margin() {
        let geometry = FaceGeometry::new(240, 240, ScreenShape::Rectangular, 30);
        assert_eq!(geometry.arc_frame(40), Some((Point::new(40, 40), 160)));
    }

    #[test]
    fn arc_is_centered_on_wide_surfaces() {
        let geometry = FaceGeometry::new(320, 240, ScreenShape::Rectangular, 0);
        assert_eq!(geometry.arc_frame(40), Some((Point::new(80, 40), 160)));
    }

    #[test]
    fn arc_without_room() {
        let geometry = FaceGeometry::new(64, 64, ScreenShape::Rectangular, 0);
        assert_eq!(geometry.arc_frame(32), None);
        assert_eq!(geometry.arc_frame(40), None);
        assert_eq!(FaceGeometry::default().arc_frame(0), None);
    }

    #[test]
    fn huge_insets_leave_no_room() {
        let geometry = FaceGeometry::new(64, 64, ScreenShape::Rectangular, 0);
        assert_eq!(geometry.arc_frame(u32::MAX / 2 + 1), None);
        assert_eq!(geometry.arc_frame(u32::MAX), None);

        let round = FaceGeometry::new(64, 64, ScreenShape::Round, u32::MAX);
        assert_eq!(round.arc_frame(0), None);
    }

    #[test]
    fn insets_update_shape() {
        let mut geometry = FaceGeometry::default();
        geometry.on_surface_changed(200, 200);
        geometry.on_insets(ScreenShape::Round, 12);
        assert_eq!(geometry.shape(), ScreenShape::Round);
        assert_eq!(geometry.chin(), 12);
        assert_eq!(geometry.arc_frame(40), Some((Point::new(12, 12), 176)));
    }
}
