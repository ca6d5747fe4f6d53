// Plain geometry types shared by the angle math and the overlay

use serde::{Deserialize, Serialize};

/// A 2D point, either normalized [0, 1] image coordinates or pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Integer pixel position inside a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Map a normalized point onto a frame of the given size.
    /// Truncates toward zero.
    pub fn from_normalized(point: Point2D, width: u32, height: u32) -> Self {
        Self {
            x: (point.x * width as f64) as i32,
            y: (point.y * height as f64) as i32,
        }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Axis-aligned pixel rectangle given by two opposite corners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl PixelRect {
    pub fn from_corners(a: PixelPoint, b: PixelPoint) -> Self {
        Self {
            left: a.x.min(b.x),
            top: a.y.min(b.y),
            right: a.x.max(b.x),
            bottom: a.y.max(b.y),
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// Opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_normalized_truncates() {
        let p = PixelPoint::from_normalized(Point2D::new(0.5, 0.999), 641, 480);
        assert_eq!(p, PixelPoint::new(320, 479));
    }

    #[test]
    fn test_rect_from_corners_normalizes() {
        let rect = PixelRect::from_corners(PixelPoint::new(10, 50), PixelPoint::new(4, 20));
        assert_eq!(rect.left, 4);
        assert_eq!(rect.top, 20);
        assert_eq!(rect.width(), 6);
        assert_eq!(rect.height(), 30);
    }
}
