use serde::Serialize;

use crate::shared::face_box::FaceBox;
use crate::shared::frame::Frame;

/// One face reported by a detector.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DetectedFace {
    pub bbox: FaceBox,
    pub score: f64,
}

/// Domain interface for face detection.
///
/// Takes a single-channel (grayscale) frame. Implementations hold engine
/// state that is mutated per call, hence `&mut self`.
pub trait FaceDetector {
    fn detect(&mut self, gray: &Frame) -> Result<Vec<DetectedFace>, Box<dyn std::error::Error>>;
}
