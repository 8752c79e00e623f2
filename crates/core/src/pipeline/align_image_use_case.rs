use std::path::{Path, PathBuf};
use std::time::Instant;

use thiserror::Error;

use crate::annotation::domain::frame_annotator::FrameAnnotator;
use crate::detection::domain::face_detector::{DetectedFace, FaceDetector};
use crate::detection::domain::landmark_detector::{AlignedFace, LandmarkDetector};
use crate::imaging::domain::image_reader::ImageReader;
use crate::imaging::domain::image_writer::ImageWriter;
use crate::pipeline::pipeline_logger::PipelineLogger;

type BoxError = Box<dyn std::error::Error>;

#[derive(Error, Debug)]
pub enum AlignError {
    #[error("cannot read image {}: {source}", path.display())]
    UnreadableImage {
        path: PathBuf,
        #[source]
        source: BoxError,
    },
    #[error("face detection failed: {0}")]
    Detection(#[source] BoxError),
    #[error("landmark detection failed: {0}")]
    Landmarks(#[source] BoxError),
    #[error("drawing failed: {0}")]
    Annotation(#[source] BoxError),
    #[error("cannot write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: BoxError,
    },
}

/// Result of a run that did not fail.
#[derive(Debug, PartialEq)]
pub enum AlignOutcome {
    /// Nothing was detected; no output was produced.
    NoFace { width: u32, height: u32 },
    Annotated {
        faces: Vec<AlignedFace>,
        width: u32,
        height: u32,
    },
}

/// Single-image pipeline: read → grayscale → detect → landmarks → draw → write.
pub struct AlignImageUseCase {
    reader: Box<dyn ImageReader>,
    writer: Box<dyn ImageWriter>,
    detector: Box<dyn FaceDetector>,
    landmark_detector: Box<dyn LandmarkDetector>,
    annotator: Box<dyn FrameAnnotator>,
    logger: Box<dyn PipelineLogger>,
    all_faces: bool,
}

impl AlignImageUseCase {
    pub fn new(
        reader: Box<dyn ImageReader>,
        writer: Box<dyn ImageWriter>,
        detector: Box<dyn FaceDetector>,
        landmark_detector: Box<dyn LandmarkDetector>,
        annotator: Box<dyn FrameAnnotator>,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            reader,
            writer,
            detector,
            landmark_detector,
            annotator,
            logger,
            all_faces: false,
        }
    }

    /// Annotate every detected face instead of only the first one.
    pub fn with_all_faces(mut self, all_faces: bool) -> Self {
        self.all_faces = all_faces;
        self
    }

    pub fn execute(
        &mut self,
        input_path: &Path,
        output_path: &Path,
    ) -> Result<AlignOutcome, AlignError> {
        let started = Instant::now();
        let mut frame =
            self.reader
                .read(input_path)
                .map_err(|source| AlignError::UnreadableImage {
                    path: input_path.to_path_buf(),
                    source,
                })?;
        let gray = frame.to_grayscale();
        let (width, height) = (frame.width(), frame.height());
        self.record("read", started);

        let started = Instant::now();
        let detected = self.detector.detect(&gray).map_err(AlignError::Detection)?;
        self.record("detect", started);
        self.logger.metric("faces", detected.len() as f64);

        if detected.is_empty() {
            self.logger
                .info(&format!("No face detected in {}", input_path.display()));
            self.logger.summary();
            return Ok(AlignOutcome::NoFace { width, height });
        }
        self.logger.info(&format!(
            "Detected {} face(s) in {}",
            detected.len(),
            input_path.display()
        ));

        let selected: Vec<DetectedFace> = if self.all_faces {
            detected
        } else {
            detected.into_iter().take(1).collect()
        };

        let started = Instant::now();
        let faces = selected
            .into_iter()
            .map(|face| {
                let landmarks = self.landmark_detector.detect_landmarks(&gray, &face)?;
                Ok(AlignedFace { face, landmarks })
            })
            .collect::<Result<Vec<_>, BoxError>>()
            .map_err(AlignError::Landmarks)?;
        self.record("align", started);

        let started = Instant::now();
        self.annotator
            .annotate(&mut frame, &faces)
            .map_err(AlignError::Annotation)?;
        self.record("draw", started);

        let started = Instant::now();
        self.writer
            .write(output_path, &frame)
            .map_err(|source| AlignError::Output {
                path: output_path.to_path_buf(),
                source,
            })?;
        self.record("write", started);

        self.logger.summary();
        Ok(AlignOutcome::Annotated {
            faces,
            width,
            height,
        })
    }

    fn record(&mut self, stage: &str, started: Instant) {
        self.logger
            .timing(stage, started.elapsed().as_secs_f64() * 1000.0);
    }
}
