//! Basic types shared across the crate.

use std::fmt;

/// The position and size of a window, not including its border.
///
/// Positions may be negative (a window can hang off the left or top
/// edge of the root window), sizes may not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Geometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Geometry {
    /// Creates a new Geometry.
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns a Geometry with all fields set to 0.
    pub fn zeroed() -> Self {
        Self::default()
    }

    /// Whether the geometry covers no area at all.
    ///
    /// The X server rejects windows with a zero dimension, so such a
    /// geometry is never valid as a request.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns a copy of `self` where both dimensions are at least 1.
    pub fn at_least_one(self) -> Self {
        Self {
            width: self.width.max(1),
            height: self.height.max(1),
            ..self
        }
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// A pixel value allocated on the X server.
///
/// For TrueColor visuals this is simply `0xAARRGGBB`, but it is
/// otherwise opaque to this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color(u32);

impl Color {
    /// Creates the Color from a 32-bit integer.
    pub fn from_hex(hex: u32) -> Self {
        Self(hex)
    }

    /// Returns the Color as a u32.
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl From<u32> for Color {
    fn from(from: u32) -> Self {
        Self(from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_empty() {
        assert!(Geometry::new(0, 0, 0, 10).is_empty());
        assert!(Geometry::new(0, 0, 10, 0).is_empty());
        assert!(!Geometry::new(-5, -5, 1, 1).is_empty());

        let fixed = Geometry::new(3, 4, 0, 0).at_least_one();
        assert_eq!(fixed, Geometry::new(3, 4, 1, 1));
    }

    #[test]
    fn test_color_pixel() {
        let color = Color::from(0x00ff8000);
        assert_eq!(color, Color::from_hex(0xff8000));
        assert_eq!(color.as_u32(), 0xff8000);
    }
}
