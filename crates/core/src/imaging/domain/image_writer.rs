use std::path::Path;

use crate::shared::frame::Frame;

/// Delivers an annotated frame: to a file, a viewer, or anywhere else.
pub trait ImageWriter {
    /// Writes an RGB frame. `path` names the destination; writers that do
    /// not persist to it may only use it as a hint (e.g. the file format).
    fn write(&self, path: &Path, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;
}
