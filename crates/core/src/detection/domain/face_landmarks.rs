//! Five facial landmarks with weighted centroid and profile estimate.
//!
//! Point order: left eye, right eye, nose tip, left mouth corner, right
//! mouth corner. Weights favour the nose (3x) over the eyes (2x) and the
//! mouth corners (1x) because it moves least relative to the face box.

use serde::Serialize;

pub const LEFT_EYE: usize = 0;
pub const RIGHT_EYE: usize = 1;
pub const NOSE: usize = 2;
pub const LEFT_MOUTH: usize = 3;
pub const RIGHT_MOUTH: usize = 4;

/// Landmark weights: [left_eye, right_eye, nose, left_mouth, right_mouth].
const WEIGHTS: [f64; 5] = [2.0, 2.0, 3.0, 1.0, 1.0];

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FaceLandmarks {
    points: [(f64, f64); 5],
}

impl FaceLandmarks {
    pub fn new(points: [(f64, f64); 5]) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[(f64, f64); 5] {
        &self.points
    }

    pub fn left_eye(&self) -> (f64, f64) {
        self.points[LEFT_EYE]
    }

    pub fn right_eye(&self) -> (f64, f64) {
        self.points[RIGHT_EYE]
    }

    pub fn nose(&self) -> (f64, f64) {
        self.points[NOSE]
    }

    /// Weighted centroid of all five points.
    pub fn center(&self) -> (f64, f64) {
        let w_sum: f64 = WEIGHTS.iter().sum();
        let (wx, wy) = self
            .points
            .iter()
            .zip(WEIGHTS)
            .fold((0.0, 0.0), |(ax, ay), ((x, y), w)| (ax + x * w, ay + y * w));
        (wx / w_sum, wy / w_sum)
    }

    /// How much the face is turned: 0.0 = frontal, 1.0 = full profile.
    ///
    /// Nose offset from the eye midpoint relative to the eye span.
    /// Returns 0.0 when the eyes coincide horizontally.
    pub fn profile_ratio(&self) -> f64 {
        let nose = self.nose();
        let left_eye = self.left_eye();
        let right_eye = self.right_eye();

        let eye_mid_x = (left_eye.0 + right_eye.0) / 2.0;
        let eye_span = (right_eye.0 - left_eye.0).abs();

        if eye_span <= 0.0 {
            return 0.0;
        }

        ((nose.0 - eye_mid_x).abs() / eye_span).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn frontal_landmarks() -> FaceLandmarks {
        FaceLandmarks::new([
            (440.0, 350.0), // left_eye
            (560.0, 350.0), // right_eye
            (500.0, 420.0), // nose (centered)
            (460.0, 470.0), // left_mouth
            (540.0, 470.0), // right_mouth
        ])
    }

    #[test]
    fn test_named_accessors() {
        let lm = frontal_landmarks();
        assert_eq!(lm.left_eye(), (440.0, 350.0));
        assert_eq!(lm.right_eye(), (560.0, 350.0));
        assert_eq!(lm.nose(), (500.0, 420.0));
    }

    // ── center ──────────────────────────────────────────────────────

    #[test]
    fn test_center_frontal_symmetric() {
        let (cx, cy) = frontal_landmarks().center();
        // cx = (440*2 + 560*2 + 500*3 + 460 + 540) / 9 = 4500/9
        assert_relative_eq!(cx, 500.0, epsilon = 0.01);
        // cy = (700 + 700 + 1260 + 470 + 470) / 9 = 3600/9
        assert_relative_eq!(cy, 400.0, epsilon = 0.01);
    }

    #[test]
    fn test_center_nose_weighted_heavier() {
        let lm = FaceLandmarks::new([
            (100.0, 100.0),
            (100.0, 100.0),
            (200.0, 100.0),
            (100.0, 100.0),
            (100.0, 100.0),
        ]);
        let (cx, _) = lm.center();
        assert_relative_eq!(cx, 1200.0 / 9.0, epsilon = 0.01);
    }

    // ── profile_ratio ───────────────────────────────────────────────

    #[test]
    fn test_profile_ratio_frontal() {
        assert_relative_eq!(frontal_landmarks().profile_ratio(), 0.0, epsilon = 0.01);
    }

    #[test]
    fn test_profile_ratio_turned() {
        let lm = FaceLandmarks::new([
            (120.0, 350.0),
            (180.0, 350.0),
            (100.0, 420.0), // nose left of the eyes
            (130.0, 470.0),
            (170.0, 470.0),
        ]);
        // |100 - 150| / 60
        assert_relative_eq!(lm.profile_ratio(), 50.0 / 60.0, epsilon = 0.01);
    }

    #[test]
    fn test_profile_ratio_clamped_to_one() {
        let lm = FaceLandmarks::new([
            (100.0, 100.0),
            (110.0, 100.0),
            (200.0, 100.0),
            (100.0, 100.0),
            (100.0, 100.0),
        ]);
        assert_relative_eq!(lm.profile_ratio(), 1.0);
    }

    #[test]
    fn test_profile_ratio_zero_eye_span() {
        let lm = FaceLandmarks::new([
            (100.0, 100.0),
            (100.0, 100.0),
            (150.0, 100.0),
            (100.0, 100.0),
            (100.0, 100.0),
        ]);
        assert_relative_eq!(lm.profile_ratio(), 0.0);
    }
}
