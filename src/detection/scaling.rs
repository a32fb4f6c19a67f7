//! Scale ratio derivation and per-tag caching.
//!
//! All matching runs in a downscaled space for speed; final coordinates are
//! reported in full-size space. The ratio is derived once per metrics tag
//! and reused until that tag is reset.

use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct ScaleRatioManager {
    ratios: HashMap<String, f64>,
    current: Option<f64>,
}

impl ScaleRatioManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive (or recall) the downscale ratio for a metrics tag.
    ///
    /// The quality knob selects the longest dimension of the scaled image in
    /// pixels: `ratio = quality / max(width, height)`, clamped so the engine
    /// never upscales. Invalid quality values degrade to 1.0 rather than
    /// failing. Once a tag has a ratio it is reused verbatim until
    /// [`reset_metrics`](Self::reset_metrics) removes it.
    pub fn compute_scale_ratio(&mut self, width: u32, height: u32, quality: f64, tag: &str) -> f64 {
        let ratio = *self
            .ratios
            .entry(tag.to_string())
            .or_insert_with(|| Self::derive_ratio(width, height, quality));
        self.current = Some(ratio);
        ratio
    }

    fn derive_ratio(width: u32, height: u32, quality: f64) -> f64 {
        let longest = f64::from(width.max(height));
        if !quality.is_finite() || quality <= 0.0 || longest <= 0.0 {
            log::warn!("invalid screen metrics (quality={quality}), matching at full size");
            return 1.0;
        }
        (quality / longest).min(1.0)
    }

    /// Ratio from the most recent [`compute_scale_ratio`](Self::compute_scale_ratio)
    /// call, 1.0 before any call.
    pub fn scale_ratio(&self) -> f64 {
        self.current.unwrap_or(1.0)
    }

    pub fn is_set(&self) -> bool {
        self.current.is_some()
    }

    /// Forget the cached ratio for a tag. The next compute call for that tag
    /// derives a fresh value.
    pub fn reset_metrics(&mut self, tag: &str) {
        self.ratios.remove(tag);
    }
}
