// Data structures for drawing and display

use crate::models::geometry::Color;

/// Text appearance for a single draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub scale: f32, // 1.0 draws glyphs roughly 21px tall
    pub color: Color,
    pub thickness: u32,
}

/// Line appearance for skeleton edges
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawingSpec {
    pub color: Color,
    pub thickness: u32,
    pub circle_radius: u32,
}

/// A key reported by the display for the frame just shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPress {
    Char(char),
    Escape,
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Frame has an invalid size: {width}x{height}")]
    InvalidFrameSize { width: u32, height: u32 },

    #[error("Drawing failed: {0}")]
    DrawFailed(String),
}

pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("Failed to write frame {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type DisplayResult<T> = Result<T, DisplayError>;
