// Data structures for frame capture

use image::RgbaImage;

/// A captured frame from the camera
#[derive(Debug, Clone)]
pub struct Frame {
    pub index: u64,
    pub timestamp: i64, // Milliseconds since the Unix epoch
    pub image: RgbaImage,
}

impl Frame {
    pub fn new(index: u64, image: RgbaImage) -> Self {
        Self {
            index,
            timestamp: chrono::Utc::now().timestamp_millis(),
            image,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Error types for frame capture operations
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Capture source not found: {0}")]
    SourceNotFound(String),

    #[error("Capture failed: {0}")]
    CaptureFailed(String),

    #[error("Failed to decode frame {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CaptureResult<T> = Result<T, CaptureError>;
