//! Template-matching capability boundary.
//!
//! The orchestrator depends on [`TemplateMatcher`] by interface so the
//! correlation backend can be swapped or stubbed in tests without touching
//! detection logic.

mod matcher;

pub use matcher::NormalizedCrossCorrelation;

use crate::error::DetectionError;
use image::GrayImage;

/// One f32 correlation score per candidate position.
pub type ScoreMatrix = image::ImageBuffer<image::Luma<f32>, Vec<f32>>;

pub trait TemplateMatcher {
    /// Compute the correlation surface of `template` slid over `search`.
    ///
    /// The result is sized `(search_w - template_w + 1) x (search_h -
    /// template_h + 1)`, higher scores meaning better matches and 1.0 a
    /// perfect one. [`NormalizedCrossCorrelation`] yields non-negative
    /// scores in `[0, 1]` (plain normalized cross-correlation, no mean
    /// subtraction); other backends may use the full `[-1, 1]` range.
    /// Callers must ensure the template fits inside the search image.
    fn match_template(
        &self,
        search: &GrayImage,
        template: &GrayImage,
    ) -> Result<ScoreMatrix, DetectionError>;
}
