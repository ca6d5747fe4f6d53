// Frame sources
// Each source yields frames one at a time until the stream ends

pub mod image_sequence;

pub use image_sequence::ImageSequenceCamera;

use crate::models::capture::{CaptureResult, Frame};
use image::{Rgba, RgbaImage};

/// Camera collaborator
pub trait Camera {
    /// Next frame, or `Ok(None)` once the stream has ended.
    /// An error means no further frames can be produced.
    fn next_frame(&mut self) -> CaptureResult<Option<Frame>>;

    /// Human readable description of the source
    fn describe(&self) -> String;
}

impl<C: Camera + ?Sized> Camera for Box<C> {
    fn next_frame(&mut self) -> CaptureResult<Option<Frame>> {
        (**self).next_frame()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

const BLANK_FILL: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Produces a fixed number of black frames.
/// Used when only a landmark recording is available.
pub struct BlankCamera {
    width: u32,
    height: u32,
    remaining: u64,
    next_index: u64,
}

impl BlankCamera {
    pub fn new(width: u32, height: u32, frame_count: u64) -> Self {
        Self {
            width,
            height,
            remaining: frame_count,
            next_index: 0,
        }
    }
}

impl Camera for BlankCamera {
    fn next_frame(&mut self) -> CaptureResult<Option<Frame>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;

        let image = RgbaImage::from_pixel(self.width, self.height, BLANK_FILL);
        let frame = Frame::new(self.next_index, image);
        self.next_index += 1;
        Ok(Some(frame))
    }

    fn describe(&self) -> String {
        format!("blank {}x{} frames", self.width, self.height)
    }
}
