// Drawing backends
// The overlay only talks to `Renderer`; backends decide how pixels are touched

pub mod font;
pub mod pixmap;

pub use pixmap::PixmapRenderer;

use crate::models::capture::Frame;
use crate::models::geometry::{Color, PixelPoint, PixelRect};
use crate::models::render::{RenderResult, TextStyle};

/// Rendering collaborator: drawing primitives against a frame buffer
pub trait Renderer {
    /// Draw `text` with its baseline-left corner at `origin`
    fn draw_text(
        &mut self,
        frame: &mut Frame,
        text: &str,
        origin: PixelPoint,
        style: &TextStyle,
    ) -> RenderResult<()>;

    fn fill_rect(&mut self, frame: &mut Frame, rect: PixelRect, color: Color) -> RenderResult<()>;

    fn fill_circle(
        &mut self,
        frame: &mut Frame,
        center: PixelPoint,
        radius: u32,
        color: Color,
    ) -> RenderResult<()>;

    fn draw_line(
        &mut self,
        frame: &mut Frame,
        from: PixelPoint,
        to: PixelPoint,
        color: Color,
        thickness: u32,
    ) -> RenderResult<()>;
}
