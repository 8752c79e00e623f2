use std::path::Path;

use crate::imaging::domain::image_reader::ImageReader;
use crate::shared::frame::Frame;

/// Reads any format the `image` crate can decode, converted to RGB8.
///
/// Alpha is dropped and 16-bit samples are narrowed.
pub struct ImageFileReader;

impl ImageFileReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageReader for ImageFileReader {
    fn read(&self, path: &Path) -> Result<Frame, Box<dyn std::error::Error>> {
        let img = image::ImageReader::open(path)?
            .with_guessed_format()?
            .decode()?
            .to_rgb8();
        let (width, height) = img.dimensions();
        log::debug!("Decoded {} ({width}x{height})", path.display());
        Ok(Frame::new(img.into_raw(), width, height, 3))
    }
}
