use std::path::Path;

use crate::imaging::domain::image_writer::ImageWriter;
use crate::shared::frame::Frame;

/// Encodes an RGB frame to a file; the format follows the extension.
pub struct ImageFileWriter;

impl ImageFileWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageWriter for ImageFileWriter {
    fn write(&self, path: &Path, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        save_rgb(path, frame)
    }
}

/// Shared by every writer that ends up with a file on disk.
pub(crate) fn save_rgb(path: &Path, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
    if frame.channels() != 3 {
        return Err(format!("Expected an RGB frame, got {} channels", frame.channels()).into());
    }
    let img = image::RgbImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
        .ok_or("Failed to create image from frame data")?;
    img.save(path)?;
    Ok(())
}
