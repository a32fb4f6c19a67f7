//! Default correlation backend.

use super::{ScoreMatrix, TemplateMatcher};
use crate::error::DetectionError;
use image::GrayImage;
use imageproc::template_matching::{MatchTemplateMethod, match_template};

/// Normalized cross-correlation matcher backed by imageproc.
pub struct NormalizedCrossCorrelation;

impl TemplateMatcher for NormalizedCrossCorrelation {
    fn match_template(
        &self,
        search: &GrayImage,
        template: &GrayImage,
    ) -> Result<ScoreMatrix, DetectionError> {
        if template.width() > search.width() || template.height() > search.height() {
            return Err(DetectionError::Matching(format!(
                "template {}x{} larger than search area {}x{}",
                template.width(),
                template.height(),
                search.width(),
                search.height()
            )));
        }

        log::debug!(
            "matching {}x{} template in {}x{} search area",
            template.width(),
            template.height(),
            search.width(),
            search.height()
        );
        Ok(match_template(
            search,
            template,
            MatchTemplateMethod::CrossCorrelationNormalized,
        ))
    }
}
