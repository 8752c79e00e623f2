use thiserror::Error;

/// Largest landmark radius or box thickness accepted, in pixels.
pub const MAX_STROKE: u32 = 1024;

#[derive(Error, Debug, PartialEq)]
pub enum StyleError {
    #[error("Landmark radius must be between 1 and {MAX_STROKE}, got {0}")]
    LandmarkRadius(u32),
    #[error("Box thickness must be between 1 and {MAX_STROKE}, got {0}")]
    BoxThickness(u32),
}

/// Colours and sizes used when drawing faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnnotationStyle {
    pub box_color: [u8; 3],
    pub landmark_color: [u8; 3],
    pub landmark_radius: u32,
    /// Border width in pixels, growing inward from the box edge.
    pub box_thickness: u32,
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self {
            box_color: [255, 0, 0],
            landmark_color: [0, 255, 0],
            landmark_radius: 2,
            box_thickness: 1,
        }
    }
}

impl AnnotationStyle {
    pub fn validate(&self) -> Result<(), StyleError> {
        if !(1..=MAX_STROKE).contains(&self.landmark_radius) {
            return Err(StyleError::LandmarkRadius(self.landmark_radius));
        }
        if !(1..=MAX_STROKE).contains(&self.box_thickness) {
            return Err(StyleError::BoxThickness(self.box_thickness));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_is_red_box_green_points() {
        let style = AnnotationStyle::default();
        assert_eq!(style.box_color, [255, 0, 0]);
        assert_eq!(style.landmark_color, [0, 255, 0]);
        assert_eq!(style.landmark_radius, 2);
        assert_eq!(style.box_thickness, 1);
        assert!(style.validate().is_ok());
    }

    #[rstest]
    #[case(0, 1, Some(StyleError::LandmarkRadius(0)))]
    #[case(u32::MAX, 1, Some(StyleError::LandmarkRadius(u32::MAX)))]
    #[case(2, 0, Some(StyleError::BoxThickness(0)))]
    #[case(2, MAX_STROKE + 1, Some(StyleError::BoxThickness(MAX_STROKE + 1)))]
    #[case(MAX_STROKE, MAX_STROKE, None)]
    fn test_validate_bounds(
        #[case] landmark_radius: u32,
        #[case] box_thickness: u32,
        #[case] expected: Option<StyleError>,
    ) {
        let style = AnnotationStyle {
            landmark_radius,
            box_thickness,
            ..Default::default()
        };
        assert_eq!(style.validate().err(), expected);
    }
}
