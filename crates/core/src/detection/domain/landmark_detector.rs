use serde::Serialize;

use crate::detection::domain::face_detector::DetectedFace;
use crate::detection::domain::face_landmarks::FaceLandmarks;
use crate::shared::frame::Frame;

/// A detected face together with its regressed landmarks.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AlignedFace {
    pub face: DetectedFace,
    pub landmarks: FaceLandmarks,
}

/// Domain interface for five-point landmark regression inside a face box.
pub trait LandmarkDetector {
    fn detect_landmarks(
        &mut self,
        gray: &Frame,
        face: &DetectedFace,
    ) -> Result<FaceLandmarks, Box<dyn std::error::Error>>;
}
