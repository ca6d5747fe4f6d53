// Image sequence camera: replays a directory of still frames in name order

use super::Camera;
use crate::models::capture::{CaptureError, CaptureResult, Frame};
use std::path::{Path, PathBuf};

const SUPPORTED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

pub struct ImageSequenceCamera {
    directory: PathBuf,
    files: Vec<PathBuf>,
    position: usize,
}

impl ImageSequenceCamera {
    /// Scan `directory` for image files. Frames are served sorted by file name.
    pub fn open(directory: impl AsRef<Path>) -> CaptureResult<Self> {
        let directory = directory.as_ref().to_path_buf();
        if !directory.is_dir() {
            return Err(CaptureError::SourceNotFound(directory.display().to_string()));
        }

        let mut files = Vec::new();
        for entry in std::fs::read_dir(&directory)? {
            let path = entry?.path();
            if path.is_file() && is_supported_image(&path) {
                files.push(path);
            }
        }
        files.sort();

        log::info!(
            "Found {} frame(s) in {}",
            files.len(),
            directory.display()
        );

        Ok(Self {
            directory,
            files,
            position: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

impl Camera for ImageSequenceCamera {
    fn next_frame(&mut self) -> CaptureResult<Option<Frame>> {
        let Some(path) = self.files.get(self.position) else {
            return Ok(None);
        };

        let mut image = image::open(path)
            .map_err(|source| CaptureError::Decode {
                path: path.display().to_string(),
                source,
            })?
            .to_rgba8();
        // Frames are drawn on as opaque premultiplied pixels
        for pixel in image.pixels_mut() {
            pixel[3] = 255;
        }

        let frame = Frame::new(self.position as u64, image);
        self.position += 1;
        Ok(Some(frame))
    }

    fn describe(&self) -> String {
        format!("image sequence {}", self.directory.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn write_frame(dir: &Path, name: &str, shade: u8) {
        RgbaImage::from_pixel(4, 3, Rgba([shade, shade, shade, 255]))
            .save(dir.join(name))
            .unwrap();
    }

    #[test]
    fn test_frames_served_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        write_frame(dir.path(), "frame_002.png", 20);
        write_frame(dir.path(), "frame_001.png", 10);
        std::fs::write(dir.path().join("notes.txt"), "not a frame").unwrap();

        let mut camera = ImageSequenceCamera::open(dir.path()).unwrap();
        assert_eq!(camera.len(), 2);

        let first = camera.next_frame().unwrap().unwrap();
        assert_eq!(first.index, 0);
        assert_eq!(first.image.get_pixel(0, 0)[0], 10);

        let second = camera.next_frame().unwrap().unwrap();
        assert_eq!(second.image.get_pixel(0, 0)[0], 20);

        assert!(camera.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_translucent_frames_become_opaque() {
        let dir = tempfile::tempdir().unwrap();
        RgbaImage::from_pixel(2, 2, Rgba([40, 80, 120, 64]))
            .save(dir.path().join("ghost.png"))
            .unwrap();

        let mut camera = ImageSequenceCamera::open(dir.path()).unwrap();
        let frame = camera.next_frame().unwrap().unwrap();
        assert!(frame.image.pixels().all(|p| p == &Rgba([40, 80, 120, 255])));
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = ImageSequenceCamera::open(dir.path().join("nope"));
        assert!(matches!(result, Err(CaptureError::SourceNotFound(_))));
    }

    #[test]
    fn test_corrupt_frame_is_capture_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.png"), b"not really a png").unwrap();

        let mut camera = ImageSequenceCamera::open(dir.path()).unwrap();
        assert!(matches!(camera.next_frame(), Err(CaptureError::Decode { .. })));
    }
}
