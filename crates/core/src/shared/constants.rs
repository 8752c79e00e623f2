pub const DETECTION_MODEL_NAME: &str = "seeta_fd_frontal_v1.0.bin";
pub const DETECTION_MODEL_URL: &str =
    "https://github.com/atomashpolskiy/rustface/raw/master/model/seeta_fd_frontal_v1.0.bin";

/// No public download; the file must be placed in the model directory.
pub const ALIGNMENT_MODEL_NAME: &str = "face_landmarks_5.onnx";

pub const DEFAULT_INPUT_IMAGE: &str = "./data/image_0001.png";
pub const DEFAULT_OUTPUT_IMAGE: &str = "./result_0001.png";
pub const DEFAULT_MODEL_DIR: &str = "./model";

/// Number of landmarks regressed per face.
pub const NUM_LANDMARKS: usize = 5;
