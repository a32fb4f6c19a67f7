//! Rectangle geometry carried across the full-size and scaled coordinate spaces.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check if this rectangle has a usable area.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Center point of this rectangle.
    pub fn center(&self) -> (u32, u32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Map every component into another coordinate space, rounding to the
    /// nearest integer. `scaled_by(r)` followed by `scaled_by(1.0 / r)`
    /// recovers the original components within one pixel.
    pub fn scaled_by(&self, ratio: f64) -> Rect {
        let scale = |v: u32| (f64::from(v) * ratio).round() as u32;
        Rect {
            x: scale(self.x),
            y: scale(self.y),
            width: scale(self.width),
            height: scale(self.height),
        }
    }

    /// Shift the origin by the given offsets, keeping the size.
    pub fn translated(&self, dx: u32, dy: u32) -> Rect {
        Rect {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// A detection region carried simultaneously in both coordinate spaces.
///
/// Derived once per detection call from the caller-supplied rectangle (or
/// the whole frame) and the session's scale ratio. Invalid input rectangles
/// are propagated untouched; the frame containment checks reject them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Roi {
    pub full_size: Rect,
    pub scaled: Rect,
}

impl Roi {
    pub fn from_full_size(full_size: Rect, ratio: f64) -> Self {
        Self {
            full_size,
            scaled: full_size.scaled_by(ratio),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_rect_rounds_componentwise() {
        let rect = Rect::new(101, 47, 33, 20);
        let scaled = rect.scaled_by(0.5);

        assert_eq!(scaled, Rect::new(51, 24, 17, 10));
    }

    #[test]
    fn test_roi_consistency_within_rounding_tolerance() {
        let ratio = 0.37;
        for rect in [
            Rect::new(0, 0, 1080, 2280),
            Rect::new(300, 1682, 50, 50),
            Rect::new(7, 13, 999, 1),
        ] {
            let roi = Roi::from_full_size(rect, ratio);
            let expected = |v: u32| (f64::from(v) * ratio).round() as u32;
            assert!(roi.scaled.width.abs_diff(expected(rect.width)) <= 1);
            assert!(roi.scaled.height.abs_diff(expected(rect.height)) <= 1);
            assert!(roi.scaled.x.abs_diff(expected(rect.x)) <= 1);
            assert!(roi.scaled.y.abs_diff(expected(rect.y)) <= 1);
        }
    }

    #[test]
    fn test_identity_ratio_keeps_rect() {
        let rect = Rect::new(10, 20, 30, 40);
        assert_eq!(rect.scaled_by(1.0), rect);
    }

    #[test]
    fn test_center_and_translate() {
        let rect = Rect::new(100, 150, 50, 50);
        assert_eq!(rect.center(), (125, 175));
        assert_eq!(rect.translated(10, 5), Rect::new(110, 155, 50, 50));
    }

    #[test]
    fn test_zero_area_rect_is_invalid() {
        assert!(!Rect::new(10, 10, 0, 5).is_valid());
        assert!(!Rect::new(10, 10, 5, 0).is_valid());
        assert!(Rect::new(10, 10, 1, 1).is_valid());
    }
}
