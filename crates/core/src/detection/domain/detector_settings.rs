use thiserror::Error;

/// Smallest face the cascade can be asked to find (its window is 20px).
pub const MIN_FACE_SIZE_FLOOR: u32 = 20;

#[derive(Error, Debug, PartialEq)]
pub enum SettingsError {
    #[error("minimum face size must be at least {MIN_FACE_SIZE_FLOOR}, got {0}")]
    MinFaceSize(u32),
    #[error("maximum face size {max} is smaller than minimum face size {min}")]
    MaxBelowMin { min: u32, max: u32 },
    #[error("score threshold must be positive, got {0}")]
    ScoreThresh(f64),
    #[error("pyramid scale factor must be between 0.01 and 0.99, got {0}")]
    PyramidScale(f32),
    #[error("window step must be positive, got ({0}, {1})")]
    WindowStep(u32, u32),
}

/// Tuning for the sliding-window cascade detector.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectorSettings {
    pub min_face_size: u32,
    /// 0 means bounded only by the image size.
    pub max_face_size: u32,
    pub score_thresh: f64,
    pub pyramid_scale_factor: f32,
    pub window_step: (u32, u32),
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self {
            min_face_size: 40,
            max_face_size: 0,
            score_thresh: 2.0,
            pyramid_scale_factor: 0.8,
            window_step: (4, 4),
        }
    }
}

impl DetectorSettings {
    /// Checks every field against the engine's accepted ranges.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.min_face_size < MIN_FACE_SIZE_FLOOR {
            return Err(SettingsError::MinFaceSize(self.min_face_size));
        }
        if self.max_face_size != 0 && self.max_face_size < self.min_face_size {
            return Err(SettingsError::MaxBelowMin {
                min: self.min_face_size,
                max: self.max_face_size,
            });
        }
        if !(self.score_thresh > 0.0) {
            return Err(SettingsError::ScoreThresh(self.score_thresh));
        }
        if !(0.01..=0.99).contains(&self.pyramid_scale_factor) {
            return Err(SettingsError::PyramidScale(self.pyramid_scale_factor));
        }
        let (sx, sy) = self.window_step;
        if sx == 0 || sy == 0 {
            return Err(SettingsError::WindowStep(sx, sy));
        }
        Ok(())
    }
}
