// Display surfaces
// A surface shows each composited frame and reports the key pressed for it

pub mod image_dir;
pub mod keyboard;

pub use image_dir::ImageDirectoryDisplay;
pub use keyboard::KeyboardDisplay;

use crate::models::capture::Frame;
use crate::models::render::{DisplayResult, KeyPress};

/// Display collaborator
pub trait Display {
    /// Show `frame`; returns the key pressed while it was up, if any
    fn show(&mut self, frame: &Frame) -> DisplayResult<Option<KeyPress>>;
}

impl<D: Display + ?Sized> Display for Box<D> {
    fn show(&mut self, frame: &Frame) -> DisplayResult<Option<KeyPress>> {
        (**self).show(frame)
    }
}

/// Discards frames; never reports a key
#[derive(Debug, Default)]
pub struct HeadlessDisplay {
    shown: u64,
}

impl HeadlessDisplay {
    pub fn frames_shown(&self) -> u64 {
        self.shown
    }
}

impl Display for HeadlessDisplay {
    fn show(&mut self, frame: &Frame) -> DisplayResult<Option<KeyPress>> {
        self.shown += 1;
        log::trace!("Frame {} shown headless", frame.index);
        Ok(None)
    }
}
