use std::path::Path;

use crate::shared::frame::Frame;

/// Decodes a still image into an RGB frame.
pub trait ImageReader {
    fn read(&self, path: &Path) -> Result<Frame, Box<dyn std::error::Error>>;
}
