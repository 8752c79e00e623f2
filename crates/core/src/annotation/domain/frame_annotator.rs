use crate::detection::domain::landmark_detector::AlignedFace;
use crate::shared::frame::Frame;

/// Domain interface for drawing detection results onto a frame.
///
/// Implementations modify the frame in-place (`&mut Frame`).
pub trait FrameAnnotator {
    fn annotate(
        &self,
        frame: &mut Frame,
        faces: &[AlignedFace],
    ) -> Result<(), Box<dyn std::error::Error>>;
}
