//! Tesseract-backed text recognition.

use super::TextRecognizer;
use crate::error::DetectionError;
use image::{ImageFormat, RgbaImage};
use leptess::{LepTess, Variable};
use std::io::Cursor;

/// Default recognizer holding one Tesseract instance for the session.
///
/// Dropping it releases the underlying native handles.
pub struct TesseractRecognizer {
    tess: LepTess,
}

impl TesseractRecognizer {
    /// Initialize Tesseract for the given language tag (e.g. "eng",
    /// "chi_sim"), using the system tessdata location.
    pub fn new(language: &str) -> Result<Self, DetectionError> {
        let mut tess =
            LepTess::new(None, language).map_err(|e| DetectionError::OcrInit(Box::new(e)))?;

        // PSM 3: fully automatic page segmentation, no orientation detection.
        tess.set_variable(Variable::TesseditPagesegMode, "3")
            .map_err(|e| DetectionError::OcrInit(Box::new(e)))?;

        log::debug!("tesseract initialized for language {language}");
        Ok(Self { tess })
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn extract_text(&mut self, region: &RgbaImage) -> Result<String, DetectionError> {
        // Leptonica ingests encoded images, not raw pixel grids.
        let mut encoded = Vec::new();
        region
            .write_to(&mut Cursor::new(&mut encoded), ImageFormat::Png)
            .map_err(DetectionError::RegionEncoding)?;

        self.tess
            .set_image_from_mem(&encoded)
            .map_err(|e| DetectionError::OcrExtraction(Box::new(e)))?;
        self.tess
            .get_utf8_text()
            .map_err(|e| DetectionError::OcrExtraction(Box::new(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    // Needs a system tesseract install with the "eng" traineddata.
    #[test]
    #[ignore]
    fn test_blank_region_reads_no_text() {
        let mut recognizer = TesseractRecognizer::new("eng").unwrap();
        let blank = RgbaImage::from_pixel(200, 100, Rgba([255, 255, 255, 255]));

        let text = recognizer.extract_text(&blank).unwrap();
        assert!(text.trim().is_empty());
    }
}
