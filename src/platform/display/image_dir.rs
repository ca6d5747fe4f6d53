// Writes every composited frame into a directory as PNG

use super::Display;
use crate::models::capture::Frame;
use crate::models::render::{DisplayError, DisplayResult, KeyPress};
use std::path::{Path, PathBuf};

pub struct ImageDirectoryDisplay {
    directory: PathBuf,
}

impl ImageDirectoryDisplay {
    /// Create the output directory if needed
    pub fn create(directory: impl AsRef<Path>) -> DisplayResult<Self> {
        let directory = directory.as_ref().to_path_buf();
        std::fs::create_dir_all(&directory)?;
        Ok(Self { directory })
    }

    pub fn frame_path(&self, frame: &Frame) -> PathBuf {
        self.directory.join(format!("frame_{:06}.png", frame.index))
    }
}

impl Display for ImageDirectoryDisplay {
    fn show(&mut self, frame: &Frame) -> DisplayResult<Option<KeyPress>> {
        let path = self.frame_path(frame);
        frame.image.save(&path).map_err(|source| DisplayError::Write {
            path: path.display().to_string(),
            source,
        })?;
        log::debug!("Wrote {}", path.display());
        Ok(None)
    }
}
