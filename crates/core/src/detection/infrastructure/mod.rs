pub mod execution_provider;
pub mod model_resolver;
pub mod onnx_landmark_detector;
pub mod seeta_face_detector;
