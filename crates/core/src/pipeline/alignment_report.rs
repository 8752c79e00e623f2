use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::detection::domain::landmark_detector::AlignedFace;
use crate::pipeline::align_image_use_case::AlignOutcome;
use crate::shared::face_box::FaceBox;

/// Machine-readable summary of one annotated image.
#[derive(Debug, Serialize)]
pub struct AlignmentReport {
    pub input: PathBuf,
    pub width: u32,
    pub height: u32,
    pub faces: Vec<FaceEntry>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct FaceEntry {
    pub bbox: FaceBox,
    pub score: f64,
    /// Left eye, right eye, nose, left mouth corner, right mouth corner.
    pub landmarks: [[f64; 2]; 5],
    /// Weighted landmark centroid.
    pub center: [f64; 2],
    pub profile_ratio: f64,
}

impl From<&AlignedFace> for FaceEntry {
    fn from(aligned: &AlignedFace) -> Self {
        let points = aligned.landmarks.points();
        let (cx, cy) = aligned.landmarks.center();
        Self {
            bbox: aligned.face.bbox,
            score: aligned.face.score,
            landmarks: points.map(|(x, y)| [x, y]),
            center: [cx, cy],
            profile_ratio: aligned.landmarks.profile_ratio(),
        }
    }
}

impl AlignmentReport {
    pub fn new(input: &Path, width: u32, height: u32, faces: &[AlignedFace]) -> Self {
        Self {
            input: input.to_path_buf(),
            width,
            height,
            faces: faces.iter().map(FaceEntry::from).collect(),
        }
    }

    /// Report for a finished run; a run without faces lists none.
    pub fn from_outcome(input: &Path, outcome: &AlignOutcome) -> Self {
        match outcome {
            AlignOutcome::NoFace { width, height } => Self::new(input, *width, *height, &[]),
            AlignOutcome::Annotated {
                faces,
                width,
                height,
            } => Self::new(input, *width, *height, faces),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn write_json(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::face_detector::DetectedFace;
    use crate::detection::domain::face_landmarks::FaceLandmarks;
    use approx::assert_relative_eq;

    fn aligned() -> AlignedFace {
        AlignedFace {
            face: DetectedFace {
                bbox: FaceBox::new(10, 20, 100, 120),
                score: 7.25,
            },
            landmarks: FaceLandmarks::new([
                (40.0, 60.0),
                (80.0, 60.0),
                (60.0, 85.0),
                (45.0, 110.0),
                (75.0, 110.0),
            ]),
        }
    }

    #[test]
    fn test_entry_from_aligned_face() {
        let entry = FaceEntry::from(&aligned());
        assert_eq!(entry.bbox, FaceBox::new(10, 20, 100, 120));
        assert_eq!(entry.score, 7.25);
        assert_eq!(entry.landmarks[2], [60.0, 85.0]);
        assert_eq!(entry.profile_ratio, 0.0);
        assert_relative_eq!(entry.center[0], 60.0);
        assert_relative_eq!(entry.center[1], (2.0 * 60.0 * 2.0 + 3.0 * 85.0 + 2.0 * 110.0) / 9.0);
    }

    #[test]
    fn test_no_face_outcome_reports_empty_faces() {
        let outcome = AlignOutcome::NoFace {
            width: 320,
            height: 240,
        };
        let report = AlignmentReport::from_outcome(Path::new("empty.png"), &outcome);
        assert_eq!((report.width, report.height), (320, 240));
        assert!(report.faces.is_empty());
    }

    #[test]
    fn test_annotated_outcome_reports_every_face() {
        let outcome = AlignOutcome::Annotated {
            faces: vec![aligned(), aligned()],
            width: 640,
            height: 480,
        };
        let report = AlignmentReport::from_outcome(Path::new("in.png"), &outcome);
        assert_eq!(report.faces.len(), 2);
        assert_eq!(report.faces[0], FaceEntry::from(&aligned()));
    }

    #[test]
    fn test_json_shape() {
        let report = AlignmentReport::new(Path::new("in.png"), 640, 480, &[aligned()]);
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value["input"], "in.png");
        assert_eq!(value["width"], 640);
        assert_eq!(value["faces"][0]["bbox"]["width"], 100);
        assert_eq!(value["faces"][0]["landmarks"][1][0], 80.0);
        assert_eq!(value["faces"][0]["landmarks"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_write_json_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("run.json");
        AlignmentReport::new(Path::new("in.png"), 1, 1, &[])
            .write_json(&path)
            .unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"faces\": []"));
    }
}
