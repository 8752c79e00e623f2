pub mod detector_settings;
pub mod face_crop;
pub mod face_detector;
pub mod face_landmarks;
pub mod landmark_detector;
