//! OCR capability boundary.
//!
//! Text verification needs only one operation from an OCR backend: hand it a
//! full-size color region, get back whatever text it reads. The default
//! backend is Tesseract via leptess; tests substitute stubs.

mod recognizer;

pub use recognizer::TesseractRecognizer;

use crate::error::DetectionError;
use image::RgbaImage;

pub trait TextRecognizer {
    /// Extract all readable text from a full-size color region.
    fn extract_text(&mut self, region: &RgbaImage) -> Result<String, DetectionError>;
}
