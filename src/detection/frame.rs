//! Source image ownership in both coordinate spaces.
//!
//! A [`FrameBuffer`] holds one ingested bitmap as full-size color plus a
//! scaled grayscale derivation, and after [`set_cropping`](FrameBuffer::set_cropping)
//! also the two views restricted to the detection region. Matching only ever
//! reads the cropped scaled grayscale; color verification reads full-size
//! color.

use super::region::{Rect, Roi};
use image::imageops::{self, FilterType};
use image::{GrayImage, RgbaImage};

#[derive(Debug, Clone)]
pub struct FrameBuffer {
    full_color: RgbaImage,
    scaled_gray: GrayImage,
    cropped_color: RgbaImage,
    cropped_gray: GrayImage,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self {
            full_color: RgbaImage::new(0, 0),
            scaled_gray: GrayImage::new(0, 0),
            cropped_color: RgbaImage::new(0, 0),
            cropped_gray: GrayImage::new(0, 0),
        }
    }
}

impl FrameBuffer {
    /// Ingest a raw bitmap, deriving the scaled grayscale image.
    ///
    /// The scaled dimensions are `round(full_size x ratio)`, floored at one
    /// pixel. Previous cropped views are discarded.
    pub fn process(&mut self, raw: &RgbaImage, ratio: f64) {
        self.full_color = raw.clone();

        let gray = imageops::grayscale(raw);
        self.scaled_gray = if ratio < 1.0 {
            let width = ((f64::from(raw.width()) * ratio).round() as u32).max(1);
            let height = ((f64::from(raw.height()) * ratio).round() as u32).max(1);
            imageops::resize(&gray, width, height, FilterType::Lanczos3)
        } else {
            gray
        };

        self.cropped_color = RgbaImage::new(0, 0);
        self.cropped_gray = GrayImage::new(0, 0);
    }

    /// Whole-frame rectangle in full-size coordinates.
    pub fn full_size_rect(&self) -> Rect {
        Rect::new(0, 0, self.full_color.width(), self.full_color.height())
    }

    pub fn scaled_size(&self) -> (u32, u32) {
        self.scaled_gray.dimensions()
    }

    pub fn full_size_color(&self) -> &RgbaImage {
        &self.full_color
    }

    pub fn scaled_gray(&self) -> &GrayImage {
        &self.scaled_gray
    }

    pub fn cropped_scaled_gray(&self) -> &GrayImage {
        &self.cropped_gray
    }

    pub fn is_full_size_contains(&self, rect: Rect) -> bool {
        rect.is_valid()
            && u64::from(rect.x) + u64::from(rect.width) <= u64::from(self.full_color.width())
            && u64::from(rect.y) + u64::from(rect.height) <= u64::from(self.full_color.height())
    }

    pub fn is_scaled_contains(&self, rect: Rect) -> bool {
        rect.is_valid()
            && u64::from(rect.x) + u64::from(rect.width) <= u64::from(self.scaled_gray.width())
            && u64::from(rect.y) + u64::from(rect.height) <= u64::from(self.scaled_gray.height())
    }

    /// Restrict both views to the detection region. The caller must have
    /// validated containment in both coordinate spaces first.
    pub fn set_cropping(&mut self, roi: &Roi) {
        self.cropped_color = imageops::crop_imm(
            &self.full_color,
            roi.full_size.x,
            roi.full_size.y,
            roi.full_size.width,
            roi.full_size.height,
        )
        .to_image();
        self.cropped_gray = imageops::crop_imm(
            &self.scaled_gray,
            roi.scaled.x,
            roi.scaled.y,
            roi.scaled.width,
            roi.scaled.height,
        )
        .to_image();
    }

    /// Matching a template larger than the cropped search area is
    /// categorically invalid; callers short-circuit on false.
    pub fn is_cropped_scaled_contains(&self, width: u32, height: u32) -> bool {
        width <= self.cropped_gray.width() && height <= self.cropped_gray.height()
    }

    /// Copy out a full-size color region, e.g. a candidate footprint for
    /// color or text verification.
    pub fn full_size_region(&self, rect: Rect) -> RgbaImage {
        imageops::crop_imm(&self.full_color, rect.x, rect.y, rect.width, rect.height).to_image()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn frame(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([120, 130, 140, 255]))
    }

    #[test]
    fn test_scaled_dimensions_follow_ratio() {
        let mut buffer = FrameBuffer::default();
        buffer.process(&frame(1000, 2000), 0.5);

        assert_eq!(buffer.scaled_size(), (500, 1000));
        assert_eq!(buffer.full_size_rect(), Rect::new(0, 0, 1000, 2000));
    }

    #[test]
    fn test_identity_ratio_skips_resize() {
        let mut buffer = FrameBuffer::default();
        buffer.process(&frame(64, 48), 1.0);

        assert_eq!(buffer.scaled_size(), (64, 48));
    }

    #[test]
    fn test_containment_checks() {
        let mut buffer = FrameBuffer::default();
        buffer.process(&frame(100, 200), 0.5);

        assert!(buffer.is_full_size_contains(Rect::new(0, 0, 100, 200)));
        assert!(!buffer.is_full_size_contains(Rect::new(90, 0, 20, 20)));
        assert!(!buffer.is_full_size_contains(Rect::new(0, 0, 0, 10)));

        assert!(buffer.is_scaled_contains(Rect::new(0, 0, 50, 100)));
        assert!(!buffer.is_scaled_contains(Rect::new(0, 90, 10, 20)));
    }

    #[test]
    fn test_cropping_restricts_both_spaces() {
        let mut buffer = FrameBuffer::default();
        buffer.process(&frame(100, 200), 0.5);

        let roi = Roi::from_full_size(Rect::new(20, 40, 60, 80), 0.5);
        buffer.set_cropping(&roi);

        assert_eq!(buffer.cropped_scaled_gray().dimensions(), (30, 40));
        assert!(buffer.is_cropped_scaled_contains(30, 40));
        assert!(!buffer.is_cropped_scaled_contains(31, 40));
    }

    #[test]
    fn test_full_size_region_dimensions() {
        let mut buffer = FrameBuffer::default();
        buffer.process(&frame(100, 100), 1.0);

        let region = buffer.full_size_region(Rect::new(10, 10, 20, 30));
        assert_eq!(region.dimensions(), (20, 30));
    }
}
