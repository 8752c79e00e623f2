use std::path::{Path, PathBuf};

use crate::imaging::domain::image_writer::ImageWriter;
use crate::shared::frame::Frame;

use super::image_file_writer::save_rgb;

/// Hands a file to whatever displays it.
pub type OpenFn = Box<dyn Fn(&Path) -> std::io::Result<()>>;

/// Shows the frame instead of saving it where the caller asked.
///
/// The frame is written to a temporary file that outlives the process
/// (the viewer may open it after we exit) and passed to the system's
/// default image viewer. The destination path only contributes its
/// extension, which selects the temporary file's format.
pub struct ViewerImageWriter {
    opener: OpenFn,
    temp_dir: Option<PathBuf>,
}

impl ViewerImageWriter {
    pub fn new() -> Self {
        Self {
            opener: Box::new(|path: &Path| open::that(path)),
            temp_dir: None,
        }
    }

    pub fn with_opener(mut self, opener: OpenFn) -> Self {
        self.opener = opener;
        self
    }

    /// Create temporary files under `dir` instead of the system temp dir.
    pub fn in_dir(mut self, dir: &Path) -> Self {
        self.temp_dir = Some(dir.to_path_buf());
        self
    }
}

impl Default for ViewerImageWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageWriter for ViewerImageWriter {
    fn write(&self, path: &Path, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("png");
        let suffix = format!(".{ext}");
        let mut builder = tempfile::Builder::new();
        builder.prefix("facemark-").suffix(&suffix);
        let temp = match &self.temp_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        let (file, temp_path) = temp.keep()?;
        drop(file);

        save_rgb(&temp_path, frame)?;
        log::info!("Opening {} in the image viewer", temp_path.display());
        (self.opener)(&temp_path)?;
        Ok(())
    }
}
