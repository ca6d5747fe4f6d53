//! Raster renderer backed by tiny-skia
//!
//! Draws straight into the frame's RGBA buffer. Cameras only yield opaque
//! frames, so the buffer is already valid premultiplied data for tiny-skia.

use super::{font, Renderer};
use crate::models::capture::Frame;
use crate::models::geometry::{Color, PixelPoint, PixelRect};
use crate::models::render::{RenderError, RenderResult, TextStyle};
use tiny_skia::{FillRule, LineCap, Paint, PathBuilder, PixmapMut, Rect, Stroke, Transform};

#[derive(Debug, Clone)]
pub struct PixmapRenderer {
    anti_alias: bool,
}

impl Default for PixmapRenderer {
    fn default() -> Self {
        Self { anti_alias: true }
    }
}

impl PixmapRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_anti_alias(mut self, anti_alias: bool) -> Self {
        self.anti_alias = anti_alias;
        self
    }

    fn paint(&self, color: Color) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, 255);
        paint.anti_alias = self.anti_alias;
        paint
    }
}

/// Borrow the frame as a tiny-skia canvas for the duration of `f`
fn with_pixmap<T>(
    frame: &mut Frame,
    f: impl FnOnce(&mut PixmapMut<'_>) -> T,
) -> RenderResult<T> {
    let (width, height) = (frame.width(), frame.height());
    let mut pixmap = PixmapMut::from_bytes(&mut frame.image, width, height)
        .ok_or(RenderError::InvalidFrameSize { width, height })?;
    Ok(f(&mut pixmap))
}

impl Renderer for PixmapRenderer {
    fn draw_text(
        &mut self,
        frame: &mut Frame,
        text: &str,
        origin: PixelPoint,
        style: &TextStyle,
    ) -> RenderResult<()> {
        let dot = font::dot_size(style.scale);
        // Heavier strokes grow every dot outward
        let grow = style.thickness.saturating_sub(1) as f32 * 0.5;
        let paint = self.paint(style.color);

        with_pixmap(frame, |pixmap| {
            for (dx, dy) in font::layout(text, style.scale) {
                let x = origin.x as f32 + dx - grow;
                let y = origin.y as f32 + dy - grow;
                if let Some(rect) = Rect::from_xywh(x, y, dot + grow * 2.0, dot + grow * 2.0) {
                    pixmap.fill_rect(rect, &paint, Transform::identity(), None);
                }
            }
        })
    }

    fn fill_rect(&mut self, frame: &mut Frame, rect: PixelRect, color: Color) -> RenderResult<()> {
        let paint = self.paint(color);
        // Corners are inclusive, like the pixel rectangles they describe
        let Some(rect) = Rect::from_ltrb(
            rect.left as f32,
            rect.top as f32,
            rect.right as f32 + 1.0,
            rect.bottom as f32 + 1.0,
        ) else {
            return Ok(());
        };

        with_pixmap(frame, |pixmap| {
            pixmap.fill_rect(rect, &paint, Transform::identity(), None);
        })
    }

    fn fill_circle(
        &mut self,
        frame: &mut Frame,
        center: PixelPoint,
        radius: u32,
        color: Color,
    ) -> RenderResult<()> {
        let paint = self.paint(color);
        let Some(path) = PathBuilder::from_circle(
            center.x as f32 + 0.5,
            center.y as f32 + 0.5,
            radius.max(1) as f32,
        ) else {
            return Err(RenderError::DrawFailed(format!(
                "Invalid circle at ({}, {})",
                center.x, center.y
            )));
        };

        with_pixmap(frame, |pixmap| {
            pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        })
    }

    fn draw_line(
        &mut self,
        frame: &mut Frame,
        from: PixelPoint,
        to: PixelPoint,
        color: Color,
        thickness: u32,
    ) -> RenderResult<()> {
        let paint = self.paint(color);

        let mut pb = PathBuilder::new();
        pb.move_to(from.x as f32 + 0.5, from.y as f32 + 0.5);
        pb.line_to(to.x as f32 + 0.5, to.y as f32 + 0.5);
        // Zero-length segments have no path; nothing to draw
        let Some(path) = pb.finish() else {
            return Ok(());
        };

        let stroke = Stroke {
            width: thickness.max(1) as f32,
            line_cap: LineCap::Round,
            ..Default::default()
        };

        with_pixmap(frame, |pixmap| {
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        })
    }
}
