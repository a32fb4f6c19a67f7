//! Mutable correlation surface with iterative best-candidate extraction.
//!
//! The surface is consumed destructively: every extracted candidate has a
//! template-sized neighborhood around it overwritten with a sentinel, so a
//! location is never returned twice and the candidate sequence is finite.

use super::region::Rect;
use crate::matching::ScoreMatrix;
use image::Luma;

/// Sentinel written over exhausted cells. Never produced by a matcher.
const SUPPRESSED: f32 = f32::NEG_INFINITY;

/// One extracted best-match location, consumed immediately for verification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchCandidate {
    /// Raw correlation score at this position.
    pub score: f32,
    /// Template footprint at the candidate position, in scaled coordinates
    /// relative to the cropped search area.
    pub scaled: Rect,
    /// The same footprint mapped back into full-size coordinates.
    pub full_size: Rect,
}

/// The per-call score matrix produced by a [`TemplateMatcher`](crate::matching::TemplateMatcher),
/// sized `(search_w - template_w + 1) x (search_h - template_h + 1)`.
pub struct MatchSurface {
    scores: ScoreMatrix,
}

impl MatchSurface {
    pub fn new(scores: ScoreMatrix) -> Self {
        Self { scores }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.scores.dimensions()
    }

    /// Lazy, finite, best-first candidate sequence.
    ///
    /// Each step extracts the current global maximum and suppresses its
    /// neighborhood, so scores come out in non-increasing order and every
    /// step removes at least one cell from the surface. Iteration ends when
    /// the surface is exhausted.
    pub fn candidates(
        &mut self,
        template_width: u32,
        template_height: u32,
        ratio: f64,
    ) -> Candidates<'_> {
        Candidates {
            surface: self,
            template_width,
            template_height,
            ratio,
        }
    }

    fn locate_max(&self) -> Option<(u32, u32, f32)> {
        let mut best: Option<(u32, u32, f32)> = None;
        for (x, y, pixel) in self.scores.enumerate_pixels() {
            let value = pixel[0];
            // Skips the sentinel and any NaN a degenerate correlation produced.
            if !value.is_finite() {
                continue;
            }
            match best {
                Some((_, _, top)) if top >= value => {}
                _ => best = Some((x, y, value)),
            }
        }
        best
    }

    fn suppress_around(&mut self, x: u32, y: u32, template_width: u32, template_height: u32) {
        let (width, height) = self.scores.dimensions();
        let x0 = x.saturating_sub(template_width / 2);
        let y0 = y.saturating_sub(template_height / 2);
        let x1 = (x + template_width / 2).min(width.saturating_sub(1));
        let y1 = (y + template_height / 2).min(height.saturating_sub(1));
        for sy in y0..=y1 {
            for sx in x0..=x1 {
                self.scores.put_pixel(sx, sy, Luma([SUPPRESSED]));
            }
        }
    }
}

pub struct Candidates<'a> {
    surface: &'a mut MatchSurface,
    template_width: u32,
    template_height: u32,
    ratio: f64,
}

impl Iterator for Candidates<'_> {
    type Item = MatchCandidate;

    fn next(&mut self) -> Option<MatchCandidate> {
        let (x, y, score) = self.surface.locate_max()?;
        let scaled = Rect::new(x, y, self.template_width, self.template_height);
        let full_size = scaled.scaled_by(1.0 / self.ratio);
        self.surface
            .suppress_around(x, y, self.template_width, self.template_height);
        Some(MatchCandidate {
            score,
            scaled,
            full_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_surface(width: u32, height: u32, value: f32) -> MatchSurface {
        MatchSurface::new(ScoreMatrix::from_pixel(width, height, Luma([value])))
    }

    fn surface_with_peak(width: u32, height: u32, peak: (u32, u32, f32)) -> MatchSurface {
        let mut scores = ScoreMatrix::from_pixel(width, height, Luma([0.1]));
        scores.put_pixel(peak.0, peak.1, Luma([peak.2]));
        MatchSurface::new(scores)
    }

    #[test]
    fn test_global_maximum_comes_first() {
        let mut surface = surface_with_peak(20, 20, (7, 11, 0.96));

        let first = surface.candidates(4, 4, 1.0).next().unwrap();
        assert_eq!((first.scaled.x, first.scaled.y), (7, 11));
        assert_eq!(first.score, 0.96);
    }

    #[test]
    fn test_scores_are_non_increasing() {
        let mut scores = ScoreMatrix::from_pixel(15, 15, Luma([0.0]));
        scores.put_pixel(2, 2, Luma([0.9]));
        scores.put_pixel(12, 3, Luma([0.7]));
        scores.put_pixel(6, 12, Luma([0.8]));
        let mut surface = MatchSurface::new(scores);

        let extracted: Vec<f32> = surface.candidates(3, 3, 1.0).map(|c| c.score).collect();
        assert!(extracted.windows(2).all(|pair| pair[0] >= pair[1]));
        assert_eq!(&extracted[..3], &[0.9, 0.8, 0.7]);
    }

    #[test]
    fn test_locations_are_never_revisited() {
        let mut surface = uniform_surface(9, 9, 0.5);

        let positions: Vec<(u32, u32)> = surface
            .candidates(3, 3, 1.0)
            .map(|c| (c.scaled.x, c.scaled.y))
            .collect();

        for (i, a) in positions.iter().enumerate() {
            assert!(!positions[i + 1..].contains(a), "{a:?} extracted twice");
        }
    }

    #[test]
    fn test_surface_exhausts_within_suppression_bound() {
        let mut surface = uniform_surface(12, 12, 0.4);

        // Suppression clears at least a quarter of the template footprint
        // even in a corner, so a 4x4 template on a 144-cell surface cannot
        // yield more than 144 / 4 candidates.
        let count = surface.candidates(4, 4, 1.0).count();
        assert!(count >= 144 / 16);
        assert!(count <= 144 / 4);

        // And the iterator stays exhausted.
        assert!(surface.candidates(4, 4, 1.0).next().is_none());
    }

    #[test]
    fn test_candidate_maps_footprint_to_full_size() {
        let mut surface = surface_with_peak(30, 30, (10, 20, 0.9));

        let candidate = surface.candidates(5, 5, 0.5).next().unwrap();
        assert_eq!(candidate.scaled, Rect::new(10, 20, 5, 5));
        assert_eq!(candidate.full_size, Rect::new(20, 40, 10, 10));
    }

    #[test]
    fn test_empty_surface_yields_nothing() {
        let mut surface = MatchSurface::new(ScoreMatrix::new(0, 0));
        assert!(surface.candidates(4, 4, 1.0).next().is_none());
    }
}
