//! screen-detect: perception core for frame-based UI automation.
//!
//! Locates a known sub-image ("condition") inside a captured screen frame,
//! or confirms that a region of the screen contains specific readable text,
//! and reports a confidence score plus a full-size screen coordinate.
//!
//! ```no_run
//! use screen_detect::{Detector, Rect};
//!
//! # fn run(frame: &image::RgbaImage, button: &image::RgbaImage)
//! #     -> Result<(), screen_detect::DetectionError> {
//! let mut detector = Detector::with_defaults("eng")?;
//! detector.set_screen_metrics("default", frame.width(), frame.height(), 800.0);
//! detector.set_screen_image(frame)?;
//!
//! let outcome = detector.detect_condition(button, Some(Rect::new(0, 0, 400, 300)), 90)?;
//! if outcome.found {
//!     println!("button at ({}, {})", outcome.x, outcome.y);
//! }
//! # Ok(())
//! # }
//! ```

pub mod detection;
pub mod error;
pub mod matching;
pub mod ocr;

pub use detection::{
    DetectionOutcome, Detector, MatchCandidate, MatchSurface, Rect, Roi, ScaleRatioManager,
    color_diff,
};
pub use error::DetectionError;
pub use matching::{NormalizedCrossCorrelation, ScoreMatrix, TemplateMatcher};
pub use ocr::{TesseractRecognizer, TextRecognizer};
