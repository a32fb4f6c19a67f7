//! Detection orchestration: session state machine, ROI resolution and the
//! candidate verification loops.

use super::color::color_diff;
use super::frame::FrameBuffer;
use super::region::{Rect, Roi};
use super::scaling::ScaleRatioManager;
use super::surface::MatchSurface;
use crate::error::DetectionError;
use crate::matching::{NormalizedCrossCorrelation, TemplateMatcher};
use crate::ocr::{TesseractRecognizer, TextRecognizer};
use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// Upper bound on OCR extractions within one text detection call. Hitting
/// the cap resolves not-found, never an error.
const MAX_TEXT_EXTRACTIONS: u32 = 100;

/// The single result of a detection call.
///
/// Either fully populated (found path) or cleared: coordinates and
/// confidence are never meaningful when `found` is false.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionOutcome {
    pub found: bool,
    /// Full-size center X of the accepted candidate.
    pub x: u32,
    /// Full-size center Y of the accepted candidate.
    pub y: u32,
    /// Raw correlation score of the accepted candidate.
    pub confidence: f32,
}

impl DetectionOutcome {
    /// The canonical not-found value.
    pub fn cleared() -> Self {
        Self {
            found: false,
            x: 0,
            y: 0,
            confidence: 0.0,
        }
    }

    fn found_at(x: u32, y: u32, confidence: f32) -> Self {
        Self {
            found: true,
            x,
            y,
            confidence,
        }
    }
}

/// Per-session detection engine.
///
/// Call order is a strict pipeline: [`set_screen_metrics`](Detector::set_screen_metrics)
/// establishes the scale ratio, [`set_screen_image`](Detector::set_screen_image)
/// ingests one frame, then any number of detection calls run against that
/// frame. Each `set_*` call destructively replaces the previous session
/// state, so concurrent callers must serialize externally.
pub struct Detector {
    scale_ratios: ScaleRatioManager,
    screen: Option<FrameBuffer>,
    condition: FrameBuffer,
    matcher: Box<dyn TemplateMatcher>,
    recognizer: Option<Box<dyn TextRecognizer>>,
}

impl Detector {
    pub fn new(matcher: Box<dyn TemplateMatcher>, recognizer: Box<dyn TextRecognizer>) -> Self {
        Self {
            scale_ratios: ScaleRatioManager::new(),
            screen: None,
            condition: FrameBuffer::default(),
            matcher,
            recognizer: Some(recognizer),
        }
    }

    /// Engine with the default backends: imageproc normalized
    /// cross-correlation and Tesseract for the given OCR language tag.
    pub fn with_defaults(ocr_language: &str) -> Result<Self, DetectionError> {
        Ok(Self::new(
            Box::new(NormalizedCrossCorrelation),
            Box::new(TesseractRecognizer::new(ocr_language)?),
        ))
    }

    /// Establish the scale ratio for the session. Must precede every other
    /// operation. Returns the ratio in effect for the tag.
    pub fn set_screen_metrics(&mut self, tag: &str, width: u32, height: u32, quality: f64) -> f64 {
        let ratio = self
            .scale_ratios
            .compute_scale_ratio(width, height, quality, tag);
        log::debug!(
            "screen metrics set: full_size={width}x{height} quality={quality} scale_ratio={ratio}"
        );
        ratio
    }

    /// Forget the cached ratio for a metrics tag.
    pub fn reset_screen_metrics(&mut self, tag: &str) {
        self.scale_ratios.reset_metrics(tag);
    }

    /// Ingest one captured frame, replacing the previous one.
    pub fn set_screen_image(&mut self, frame: &RgbaImage) -> Result<(), DetectionError> {
        if !self.scale_ratios.is_set() {
            return Err(DetectionError::NoScreenMetrics);
        }
        let ratio = self.scale_ratios.scale_ratio();
        self.screen
            .get_or_insert_with(FrameBuffer::default)
            .process(frame, ratio);
        Ok(())
    }

    /// Visual mode: locate `condition` inside the frame (or inside `rect`).
    ///
    /// The threshold knob drives both acceptance gates, and its correlation
    /// side is inverted relative to intuition: a candidate passes when its
    /// correlation exceeds `(100 - threshold) / 100` AND its mean-color
    /// distance from the condition stays below `threshold`. So threshold 100
    /// accepts any positive correlation while threshold 0 accepts nothing.
    pub fn detect_condition(
        &mut self,
        condition: &RgbaImage,
        rect: Option<Rect>,
        threshold: u8,
    ) -> Result<DetectionOutcome, DetectionError> {
        let Some((roi, mut surface)) = self.prepare(condition, rect)? else {
            return Ok(DetectionOutcome::cleared());
        };

        // One knob, two named gates. Keep the formulas side by side so they
        // cannot drift apart when one is tuned.
        let threshold = u32::from(threshold.min(100));
        let correlation_floor = (100 - threshold) as f32 / 100.0;
        let color_ceiling = f64::from(threshold);

        let ratio = self.scale_ratios.scale_ratio();
        let (condition_width, condition_height) = self.condition.scaled_size();
        let Some(screen) = self.screen.as_ref() else {
            return Err(DetectionError::NoScreenImage);
        };

        for candidate in surface.candidates(condition_width, condition_height, ratio) {
            let scaled = candidate.scaled.translated(roi.scaled.x, roi.scaled.y);
            let full_size = candidate
                .full_size
                .translated(roi.full_size.x, roi.full_size.y);

            // A footprint that rounds out of either space is not a match.
            if !screen.is_scaled_contains(scaled) || !screen.is_full_size_contains(full_size) {
                continue;
            }

            // Candidates come out best-first: once the score reaches the
            // floor nothing later can clear it.
            if candidate.score <= correlation_floor {
                break;
            }

            let region = screen.full_size_region(full_size);
            let diff = color_diff(&region, self.condition.full_size_color());
            if diff < color_ceiling {
                let (x, y) = full_size.center();
                log::debug!(
                    "condition found at ({x},{y}): score={} color_diff={diff:.2}",
                    candidate.score
                );
                return Ok(DetectionOutcome::found_at(x, y, candidate.score));
            }
        }

        Ok(DetectionOutcome::cleared())
    }

    /// Text mode: confirm that `target` occurs (case-sensitive) in text read
    /// from the frame around `condition`-shaped candidate regions.
    ///
    /// The correlation surface only orders candidates by visual salience
    /// here; scores never gate acceptance. At most 100 OCR attempts are
    /// made per call; exhausting the cap resolves not-found.
    pub fn detect_text(
        &mut self,
        condition: &RgbaImage,
        rect: Option<Rect>,
        target: &str,
    ) -> Result<DetectionOutcome, DetectionError> {
        if self.recognizer.is_none() {
            return Err(DetectionError::RecognizerReleased);
        }
        let Some((roi, mut surface)) = self.prepare(condition, rect)? else {
            return Ok(DetectionOutcome::cleared());
        };

        let ratio = self.scale_ratios.scale_ratio();
        let (condition_width, condition_height) = self.condition.scaled_size();
        let Some(screen) = self.screen.as_ref() else {
            return Err(DetectionError::NoScreenImage);
        };
        let Some(recognizer) = self.recognizer.as_mut() else {
            return Err(DetectionError::RecognizerReleased);
        };

        let mut extractions = 0u32;
        for candidate in surface.candidates(condition_width, condition_height, ratio) {
            let scaled = candidate.scaled.translated(roi.scaled.x, roi.scaled.y);
            let full_size = candidate
                .full_size
                .translated(roi.full_size.x, roi.full_size.y);

            // Out-of-bounds candidates are discarded without counting as an
            // extraction attempt.
            if !screen.is_scaled_contains(scaled) || !screen.is_full_size_contains(full_size) {
                continue;
            }

            let region = screen.full_size_region(full_size);
            let text = recognizer.extract_text(&region)?;
            extractions += 1;

            if text.contains(target) {
                let (x, y) = full_size.center();
                log::debug!("text {target:?} found at ({x},{y}) after {extractions} extractions");
                return Ok(DetectionOutcome::found_at(x, y, candidate.score));
            }

            if extractions >= MAX_TEXT_EXTRACTIONS {
                log::warn!("text detection gave up after {MAX_TEXT_EXTRACTIONS} extractions");
                break;
            }
        }

        Ok(DetectionOutcome::cleared())
    }

    /// Tear down the native OCR resources held by this session. Text
    /// detection is unavailable afterwards; visual detection keeps working.
    pub fn release(&mut self) {
        self.recognizer = None;
        log::debug!("detector released");
    }

    /// Shared front half of both detection modes: resolve the ROI, process
    /// the condition image, validate geometry and compute the correlation
    /// surface. `Ok(None)` means a geometry rejection (cleared outcome).
    fn prepare(
        &mut self,
        condition: &RgbaImage,
        rect: Option<Rect>,
    ) -> Result<Option<(Roi, MatchSurface)>, DetectionError> {
        if !self.scale_ratios.is_set() {
            return Err(DetectionError::NoScreenMetrics);
        }
        let ratio = self.scale_ratios.scale_ratio();

        let Some(screen) = self.screen.as_mut() else {
            return Err(DetectionError::NoScreenImage);
        };
        let roi = Roi::from_full_size(rect.unwrap_or(screen.full_size_rect()), ratio);

        if !screen.is_full_size_contains(roi.full_size) || !screen.is_scaled_contains(roi.scaled) {
            log::warn!(
                "detection ROI {:?} is outside the frame, skipping condition",
                roi.full_size
            );
            return Ok(None);
        }

        // ROI is validated; now resample the condition.
        self.condition.process(condition, ratio);
        screen.set_cropping(&roi);
        let (condition_width, condition_height) = self.condition.scaled_size();
        if !screen.is_cropped_scaled_contains(condition_width, condition_height) {
            log::warn!(
                "condition ({condition_width}x{condition_height} scaled) is bigger than the search area, skipping it"
            );
            return Ok(None);
        }

        let scores = self
            .matcher
            .match_template(screen.cropped_scaled_gray(), self.condition.scaled_gray())?;
        Ok(Some((roi, MatchSurface::new(scores))))
    }
}
