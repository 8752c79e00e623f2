//! Frontal face detector backed by the `rustface` SeetaFace cascade.
//!
//! Reads the SeetaFace binary model once at construction and runs the
//! funnel-structured cascade over an image pyramid on every call.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::detection::domain::detector_settings::{DetectorSettings, SettingsError};
use crate::detection::domain::face_detector::{DetectedFace, FaceDetector};
use crate::shared::face_box::FaceBox;
use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum SeetaModelError {
    #[error("invalid detector settings: {0}")]
    Settings(#[from] SettingsError),
    #[error("failed to read detection model {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub struct SeetaFaceDetector {
    detector: Box<dyn rustface::Detector>,
}

impl SeetaFaceDetector {
    /// Load the cascade model and apply `settings`.
    ///
    /// Settings are validated first; the engine aborts on out-of-range values.
    pub fn new(model_path: &Path, settings: &DetectorSettings) -> Result<Self, SeetaModelError> {
        settings.validate()?;

        let read_err = |source| SeetaModelError::Read {
            path: model_path.to_path_buf(),
            source,
        };
        let file = File::open(model_path).map_err(read_err)?;
        let model = rustface::read_model(BufReader::new(file)).map_err(read_err)?;

        let mut detector = rustface::create_detector_with_model(model);
        detector.set_min_face_size(settings.min_face_size);
        if settings.max_face_size > 0 {
            detector.set_max_face_size(settings.max_face_size);
        }
        detector.set_score_thresh(settings.score_thresh);
        detector.set_pyramid_scale_factor(settings.pyramid_scale_factor);
        detector.set_slide_window_step(settings.window_step.0, settings.window_step.1);

        log::info!(
            "Face detector ready (min_face={}, thresh={}, scale={}, step={:?})",
            settings.min_face_size,
            settings.score_thresh,
            settings.pyramid_scale_factor,
            settings.window_step
        );
        Ok(Self { detector })
    }
}

impl FaceDetector for SeetaFaceDetector {
    fn detect(&mut self, gray: &Frame) -> Result<Vec<DetectedFace>, Box<dyn std::error::Error>> {
        if gray.channels() != 1 {
            return Err(format!(
                "Face detection expects a grayscale frame, got {} channels",
                gray.channels()
            )
            .into());
        }
        if gray.is_empty() {
            return Ok(Vec::new());
        }

        let image = rustface::ImageData::new(gray.data(), gray.width(), gray.height());
        let faces = self
            .detector
            .detect(&image)
            .iter()
            .map(|info| {
                let bbox = info.bbox();
                to_detected_face(bbox.x(), bbox.y(), bbox.width(), bbox.height(), info.score())
            })
            .collect();
        Ok(faces)
    }
}

fn to_detected_face(x: i32, y: i32, width: u32, height: u32, score: f64) -> DetectedFace {
    DetectedFace {
        bbox: FaceBox::new(x, y, width as i32, height as i32),
        score,
    }
}
