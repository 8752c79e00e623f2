//! Five-point landmark regressor using ONNX Runtime via `ort`.
//!
//! Crops a square around the detected face, resamples it to the network
//! input, and maps the normalised `(x, y)` outputs back to image pixels.

use std::path::Path;

use crate::detection::domain::face_crop::{FaceCrop, DEFAULT_MARGIN};
use crate::detection::domain::face_detector::DetectedFace;
use crate::detection::domain::face_landmarks::FaceLandmarks;
use crate::detection::domain::landmark_detector::LandmarkDetector;
use crate::shared::constants::NUM_LANDMARKS;
use crate::shared::frame::Frame;

use super::execution_provider::preferred_execution_providers;

/// Fallback input resolution when the model shape is dynamic.
const DEFAULT_INPUT_SIZE: usize = 112;

/// Fallback channel count when the model shape is dynamic.
const DEFAULT_INPUT_CHANNELS: usize = 1;

pub struct OnnxLandmarkDetector {
    session: ort::session::Session,
    input_size: usize,
    input_channels: usize,
}

impl OnnxLandmarkDetector {
    /// Load a landmark ONNX model.
    ///
    /// Input geometry is read from the model's NCHW input shape.
    pub fn new(model_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let session = ort::session::Session::builder()?
            .with_execution_providers(preferred_execution_providers())?
            .commit_from_file(model_path)?;

        let shape = session.inputs().first().and_then(|input| {
            if let ort::value::ValueType::Tensor { ref shape, .. } = input.dtype() {
                Some(shape.to_vec())
            } else {
                None
            }
        });
        let (input_channels, input_size) = match shape {
            Some(shape) => input_geometry(&shape)?,
            None => (DEFAULT_INPUT_CHANNELS, DEFAULT_INPUT_SIZE),
        };

        log::info!(
            "Landmark model loaded: {}x{} input, {} channel(s)",
            input_size,
            input_size,
            input_channels
        );

        Ok(Self {
            session,
            input_size,
            input_channels,
        })
    }
}

/// `(channels, side)` from an NCHW input shape.
///
/// Dynamic dimensions fall back to the defaults; a fixed non-square input
/// cannot take a square face crop and is an error.
fn input_geometry(shape: &[i64]) -> Result<(usize, usize), String> {
    if shape.len() != 4 {
        return Err(format!("Landmark model input must be NCHW, got shape {shape:?}"));
    }
    let dim = |v: i64, fallback: usize| if v > 0 { v as usize } else { fallback };
    let channels = dim(shape[1], DEFAULT_INPUT_CHANNELS);
    let (h, w) = (shape[2], shape[3]);
    let side = match (h > 0, w > 0) {
        (true, true) if h != w => {
            return Err(format!("Landmark model input must be square, got {h}x{w}"));
        }
        (true, _) => h as usize,
        (false, true) => w as usize,
        (false, false) => DEFAULT_INPUT_SIZE,
    };
    Ok((channels, side))
}

impl LandmarkDetector for OnnxLandmarkDetector {
    fn detect_landmarks(
        &mut self,
        gray: &Frame,
        face: &DetectedFace,
    ) -> Result<FaceLandmarks, Box<dyn std::error::Error>> {
        if gray.channels() != 1 {
            return Err(format!(
                "Landmark detection expects a grayscale frame, got {} channels",
                gray.channels()
            )
            .into());
        }
        if gray.is_empty() {
            return Err("Landmark detection on an empty frame".into());
        }

        let crop = FaceCrop::around(&face.bbox, DEFAULT_MARGIN);
        let input_tensor = preprocess(gray, &crop, self.input_size, self.input_channels);

        let input_value = ort::value::Tensor::from_array(input_tensor)?;
        let outputs = self.session.run(ort::inputs![input_value])?;
        if outputs.len() == 0 {
            return Err("Landmark model produced no outputs".into());
        }
        let values: Vec<f32> = outputs[0].try_extract_array::<f32>()?.iter().copied().collect();

        let landmarks = decode(&values, &crop)?;
        log::debug!("Landmarks for {:?}: {:?}", face.bbox, landmarks.points());
        Ok(landmarks)
    }
}

// ---------------------------------------------------------------------------
// Preprocessing
// ---------------------------------------------------------------------------

/// Bilinearly resample `crop` from a grayscale frame into a
/// `1 × channels × size × size` tensor normalised to [0, 1].
///
/// Samples outside the frame replicate the nearest edge pixel.
fn preprocess(gray: &Frame, crop: &FaceCrop, size: usize, channels: usize) -> ndarray::Array4<f32> {
    let mut tensor = ndarray::Array4::<f32>::zeros((1, channels, size, size));

    for row in 0..size {
        for col in 0..size {
            let (sx, sy) = crop.sample_point(col, row, size);
            let value = bilinear(gray, sx, sy) / 255.0;
            for c in 0..channels {
                tensor[[0, c, row, col]] = value;
            }
        }
    }

    tensor
}

fn bilinear(gray: &Frame, x: f64, y: f64) -> f32 {
    let w = gray.width() as i64;
    let h = gray.height() as i64;
    let data = gray.data();
    let at = |px: i64, py: i64| -> f64 {
        let cx = px.clamp(0, w - 1) as usize;
        let cy = py.clamp(0, h - 1) as usize;
        data[cy * w as usize + cx] as f64
    };

    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let (ix, iy) = (x0 as i64, y0 as i64);

    let top = at(ix, iy) * (1.0 - fx) + at(ix + 1, iy) * fx;
    let bottom = at(ix, iy + 1) * (1.0 - fx) + at(ix + 1, iy + 1) * fx;
    (top * (1.0 - fy) + bottom * fy) as f32
}

// ---------------------------------------------------------------------------
// Output decoding
// ---------------------------------------------------------------------------

/// Read `[x0, y0, x1, y1, ...]` in crop-normalised units and map to image space.
fn decode(values: &[f32], crop: &FaceCrop) -> Result<FaceLandmarks, Box<dyn std::error::Error>> {
    if values.len() < NUM_LANDMARKS * 2 {
        return Err(format!(
            "Landmark model expected at least {} outputs, got {}",
            NUM_LANDMARKS * 2,
            values.len()
        )
        .into());
    }

    let mut points = [(0.0f64, 0.0f64); NUM_LANDMARKS];
    for (k, point) in points.iter_mut().enumerate() {
        *point = crop.to_image(values[k * 2] as f64, values[k * 2 + 1] as f64);
    }
    Ok(FaceLandmarks::new(points))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
