//! Rotation helpers.
//!
//! [`Rotation`] stores an angle in degrees, clockwise, with 0 meaning "facing
//! up". [`rotate_point`] is the plain 2D rotation used to carry per-frame
//! light offsets along with a rotated sprite.

/// Integer 2D point in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Debug, Copy, Default, PartialEq)]
pub struct Rotation {
    pub degrees: f32,
}

impl Rotation {
    pub fn new(degrees: f32) -> Self {
        Self { degrees }
    }

    /// Angle used to project light offsets: half a turn past the sprite angle.
    pub fn light_degrees(&self) -> f64 {
        self.degrees as f64 + 180.0
    }
}

/// Rotate `point` around `pivot` by `angle_in_degrees`.
///
/// Results are rounded to the nearest pixel so that exact quarter and half
/// turns do not lose a pixel to floating point error.
pub fn rotate_point(point: Point, pivot: Point, angle_in_degrees: f64) -> Point {
    let rad = angle_in_degrees.to_radians();
    let (sin, cos) = rad.sin_cos();
    let dx = (point.x - pivot.x) as f64;
    let dy = (point.y - pivot.y) as f64;
    Point {
        x: (cos * dx - sin * dy).round() as i32 + pivot.x,
        y: (sin * dx + cos * dy).round() as i32 + pivot.y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_angle_is_identity() {
        let p = Point::new(7, -3);
        assert_eq!(rotate_point(p, Point::new(0, 0), 0.0), p);
        assert_eq!(rotate_point(p, Point::new(4, 9), 0.0), p);
    }

    #[test]
    fn test_half_turn_negates_offsets() {
        let p = rotate_point(Point::new(5, 2), Point::new(0, 0), 180.0);
        assert_eq!(p, Point::new(-5, -2));
    }

    #[test]
    fn test_half_turn_around_pivot() {
        // offset from pivot is (3, -1); negated it lands at (7, 11)
        let p = rotate_point(Point::new(13, 9), Point::new(10, 10), 180.0);
        assert_eq!(p, Point::new(7, 11));
    }

    #[test]
    fn test_quarter_turn() {
        let p = rotate_point(Point::new(10, 0), Point::new(0, 0), 90.0);
        assert_eq!(p, Point::new(0, 10));
        let p = rotate_point(Point::new(0, 10), Point::new(0, 0), 90.0);
        assert_eq!(p, Point::new(-10, 0));
    }

    #[test]
    fn test_full_turn_is_identity() {
        let p = Point::new(-6, 14);
        assert_eq!(rotate_point(p, Point::new(0, 0), 360.0), p);
    }

    #[test]
    fn test_light_degrees_adds_half_turn() {
        assert_eq!(Rotation::new(90.0).light_degrees(), 270.0);
        assert_eq!(Rotation::default().light_degrees(), 180.0);
    }
}
