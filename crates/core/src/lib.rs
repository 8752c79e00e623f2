//! Face detection and five-point landmark annotation for still images.
//!
//! Detection runs the SeetaFace frontal cascade (`rustface`); landmarks come
//! from an ONNX regression network (`ort`). [`pipeline::align_image_use_case`]
//! ties reading, detection, alignment, drawing and output together.

pub mod annotation;
pub mod detection;
pub mod imaging;
pub mod pipeline;
pub mod shared;
