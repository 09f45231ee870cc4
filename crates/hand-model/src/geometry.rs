//! Frame and screen coordinate geometry.
//!
//! Landmarks arrive normalized against the capture frame; pointer targets
//! are absolute screen pixels. The mapping is linear:
//! `screen_x = pixel_x * screen_width / frame_width` (same for y).

use serde::{Deserialize, Serialize};

/// A 2D point in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point2D) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Screen dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl ScreenSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for ScreenSize {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// Map a capture-frame pixel position to absolute screen coordinates.
pub fn pixel_to_screen(
    point: Point2D,
    frame_width: u32,
    frame_height: u32,
    screen: ScreenSize,
) -> (i32, i32) {
    let x = point.x * screen.width as f64 / frame_width.max(1) as f64;
    let y = point.y * screen.height as f64 / frame_height.max(1) as f64;
    (x as i32, y as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_3_4_5_triangle() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(3.0, 4.0);
        assert_eq!(a.distance_to(&b), 5.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = Point2D::new(120.0, 44.0);
        let b = Point2D::new(7.5, 300.0);
        assert!((a.distance_to(&b) - b.distance_to(&a)).abs() < 1e-12);
    }

    #[test]
    fn test_pixel_to_screen_linear_mapping() {
        let screen = ScreenSize::new(1920, 1080);
        let (sx, sy) = pixel_to_screen(Point2D::new(320.0, 240.0), 640, 480, screen);
        assert_eq!(sx, 960);
        assert_eq!(sy, 540);
    }

    #[test]
    fn test_pixel_to_screen_origin_and_extent() {
        let screen = ScreenSize::new(1920, 1080);
        assert_eq!(
            pixel_to_screen(Point2D::new(0.0, 0.0), 640, 480, screen),
            (0, 0)
        );
        assert_eq!(
            pixel_to_screen(Point2D::new(640.0, 480.0), 640, 480, screen),
            (1920, 1080)
        );
    }
}
