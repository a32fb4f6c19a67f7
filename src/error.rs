use thiserror::Error;

/// Engine-level faults.
///
/// "Not found" is never an error: geometry rejections and failed
/// verification resolve to a cleared
/// [`DetectionOutcome`](crate::DetectionOutcome). These variants cover the
/// conditions that leave the engine unable to run a detection at all.
#[derive(Error, Debug)]
pub enum DetectionError {
    #[error("screen metrics have not been set")]
    NoScreenMetrics,

    #[error("no screen image has been processed")]
    NoScreenImage,

    #[error("text recognizer has been released")]
    RecognizerReleased,

    #[error("template matching failed: {0}")]
    Matching(String),

    #[error("failed to initialize OCR engine")]
    OcrInit(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("text extraction failed")]
    OcrExtraction(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("failed to encode region for OCR")]
    RegionEncoding(#[source] image::ImageError),
}
