//! Detection engine core.
//!
//! This module answers one question per call: does a known sub-image (or a
//! piece of readable text) occur inside a bounded region of the current
//! frame, above a confidence bar? Matching runs in a downscaled grayscale
//! space for speed; verification and reported coordinates use full-size
//! color space.

pub mod color;
pub mod detector;
pub mod frame;
pub mod region;
pub mod scaling;
pub mod surface;


pub use color::color_diff;
pub use detector::{DetectionOutcome, Detector};
pub use frame::FrameBuffer;
pub use region::{Rect, Roi};
pub use scaling::ScaleRatioManager;
pub use surface::{Candidates, MatchCandidate, MatchSurface};
