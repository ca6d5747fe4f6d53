// On-frame overlay: rep count, stage, progress bar, skeleton, key joints
//
// Positions are fractions of the frame size so the layout holds for any
// camera resolution.

use crate::models::capture::Frame;
use crate::models::geometry::{Color, PixelPoint, PixelRect};
use crate::models::pose::{BodyLandmark, BodyPose, POSE_CONNECTIONS};
use crate::models::render::{DrawingSpec, RenderResult, TextStyle};
use crate::models::rep::RepState;
use crate::platform::render::Renderer;

// ==============================================================================
// Layout
// ==============================================================================

const COUNT_ANCHOR: (f64, f64) = (0.05, 0.10);
const STAGE_ANCHOR: (f64, f64) = (0.05, 0.90);

const COUNT_STYLE: TextStyle = TextStyle {
    scale: 1.5,
    color: Color::YELLOW,
    thickness: 2,
};

const STAGE_STYLE: TextStyle = TextStyle {
    scale: 1.2,
    color: Color::YELLOW,
    thickness: 2,
};

const SHADOW_COLOR: Color = Color::BLACK;
const SHADOW_OFFSET: i32 = 2;

const BAR_WIDTH_RATIO: f64 = 0.03;
const BAR_HEIGHT_RATIO: f64 = 0.6;
const BAR_LEFT_RATIO: f64 = 0.95;
const BAR_BACKGROUND: Color = Color::rgb(200, 200, 200);
const BAR_FILL: Color = Color::GREEN;
const BAR_LABEL_OFFSET: (i32, i32) = (-50, 30);
const BAR_LABEL_STYLE: TextStyle = TextStyle {
    scale: 0.7,
    color: Color::WHITE,
    thickness: 2,
};

const LANDMARK_SPEC: DrawingSpec = DrawingSpec {
    color: Color::rgb(66, 117, 245),
    thickness: 2,
    circle_radius: 2,
};

const CONNECTION_SPEC: DrawingSpec = DrawingSpec {
    color: Color::rgb(230, 66, 245),
    thickness: 2,
    circle_radius: 2,
};

/// Skeleton points below this visibility are left out
const SKELETON_VISIBILITY_THRESHOLD: f32 = 0.5;

const HIGHLIGHTED_JOINTS: [BodyLandmark; 5] = [
    BodyLandmark::Nose,
    BodyLandmark::LeftElbow,
    BodyLandmark::LeftWrist,
    BodyLandmark::RightElbow,
    BodyLandmark::RightWrist,
];
const HIGHLIGHT_RADIUS: u32 = 5;
const HIGHLIGHT_COLOR: Color = Color::GREEN;

/// Geometry of the vertical progress bar for one frame size
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressBarLayout {
    pub background: PixelRect,
    /// `None` while progress rounds down to an empty bar
    pub fill: Option<PixelRect>,
    pub label_origin: PixelPoint,
    pub label: String,
}

impl ProgressBarLayout {
    pub fn new(width: u32, height: u32, progress: f64) -> Self {
        let (w, h) = (width as f64, height as f64);
        let bar_width = (w * BAR_WIDTH_RATIO) as i32;
        let bar_height = (h * BAR_HEIGHT_RATIO) as i32;
        let left = (w * BAR_LEFT_RATIO) as i32;
        let top = (height as i32 - bar_height) / 2;
        let bottom = top + bar_height;

        let background = PixelRect::from_corners(
            PixelPoint::new(left, top),
            PixelPoint::new(left + bar_width, bottom),
        );

        let progress = progress.clamp(0.0, 100.0);
        let filled = ((progress / 100.0) * bar_height as f64) as i32;
        let fill = (filled > 0).then(|| {
            PixelRect::from_corners(
                PixelPoint::new(left, bottom - filled),
                PixelPoint::new(left + bar_width, bottom),
            )
        });

        Self {
            background,
            fill,
            label_origin: PixelPoint::new(left, bottom).offset(BAR_LABEL_OFFSET.0, BAR_LABEL_OFFSET.1),
            label: format!("{}%", progress as u32),
        }
    }
}

fn anchor(frame: &Frame, (fx, fy): (f64, f64)) -> PixelPoint {
    PixelPoint::new(
        (frame.width() as f64 * fx) as i32,
        (frame.height() as f64 * fy) as i32,
    )
}

// ==============================================================================
// Drawing
// ==============================================================================

/// Draw the full overlay for a frame whose pose was usable.
///
/// Every section is attempted even if an earlier one fails; the first
/// failure is returned.
pub fn draw_overlay<R: Renderer + ?Sized>(
    renderer: &mut R,
    frame: &mut Frame,
    state: &RepState,
    pose: &BodyPose,
) -> RenderResult<()> {
    let results = [
        draw_counters(renderer, frame, state),
        draw_progress_bar(renderer, frame, state.progress),
        draw_skeleton(renderer, frame, pose),
        draw_highlights(renderer, frame, pose),
    ];
    results.into_iter().collect()
}

/// Rep count (top left) and stage (bottom left)
pub fn draw_counters<R: Renderer + ?Sized>(
    renderer: &mut R,
    frame: &mut Frame,
    state: &RepState,
) -> RenderResult<()> {
    let count_origin = anchor(frame, COUNT_ANCHOR);
    let stage_origin = anchor(frame, STAGE_ANCHOR);

    draw_text_with_shadow(
        renderer,
        frame,
        &format!("Curls: {}", state.count),
        count_origin,
        &COUNT_STYLE,
    )?;
    draw_text_with_shadow(
        renderer,
        frame,
        &format!("Stage: {}", state.stage.label()),
        stage_origin,
        &STAGE_STYLE,
    )
}

fn draw_text_with_shadow<R: Renderer + ?Sized>(
    renderer: &mut R,
    frame: &mut Frame,
    text: &str,
    origin: PixelPoint,
    style: &TextStyle,
) -> RenderResult<()> {
    let shadow = TextStyle {
        color: SHADOW_COLOR,
        thickness: style.thickness + 2,
        ..*style
    };
    renderer.draw_text(frame, text, origin.offset(SHADOW_OFFSET, SHADOW_OFFSET), &shadow)?;
    renderer.draw_text(frame, text, origin, style)
}

pub fn draw_progress_bar<R: Renderer + ?Sized>(
    renderer: &mut R,
    frame: &mut Frame,
    progress: f64,
) -> RenderResult<()> {
    let layout = ProgressBarLayout::new(frame.width(), frame.height(), progress);

    renderer.fill_rect(frame, layout.background, BAR_BACKGROUND)?;
    if let Some(fill) = layout.fill {
        renderer.fill_rect(frame, fill, BAR_FILL)?;
    }
    renderer.draw_text(frame, &layout.label, layout.label_origin, &BAR_LABEL_STYLE)
}

/// Connections first, then landmark dots on top
pub fn draw_skeleton<R: Renderer + ?Sized>(
    renderer: &mut R,
    frame: &mut Frame,
    pose: &BodyPose,
) -> RenderResult<()> {
    let (width, height) = (frame.width(), frame.height());
    let visible_point = |landmark: BodyLandmark| {
        let keypoint = pose.keypoint(landmark);
        keypoint
            .is_visible(SKELETON_VISIBILITY_THRESHOLD)
            .then(|| PixelPoint::from_normalized(keypoint.position(), width, height))
    };

    for (start, end) in POSE_CONNECTIONS {
        if let (Some(from), Some(to)) = (visible_point(start), visible_point(end)) {
            renderer.draw_line(frame, from, to, CONNECTION_SPEC.color, CONNECTION_SPEC.thickness)?;
        }
    }

    for keypoint in pose.keypoints() {
        if keypoint.is_visible(SKELETON_VISIBILITY_THRESHOLD) {
            let center = PixelPoint::from_normalized(keypoint.position(), width, height);
            renderer.fill_circle(frame, center, LANDMARK_SPEC.circle_radius, LANDMARK_SPEC.color)?;
        }
    }

    Ok(())
}

/// Nose, elbows and wrists, regardless of visibility
pub fn draw_highlights<R: Renderer + ?Sized>(
    renderer: &mut R,
    frame: &mut Frame,
    pose: &BodyPose,
) -> RenderResult<()> {
    let (width, height) = (frame.width(), frame.height());
    for landmark in HIGHLIGHTED_JOINTS {
        let center = PixelPoint::from_normalized(pose.keypoint(landmark).position(), width, height);
        renderer.fill_circle(frame, center, HIGHLIGHT_RADIUS, HIGHLIGHT_COLOR)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::pose::{Keypoint3D, BODY_LANDMARK_COUNT};
    use crate::models::render::RenderError;
    use crate::models::rep::Stage;
    use image::RgbaImage;

    /// Records every draw call instead of touching pixels
    #[derive(Default)]
    struct RecordingRenderer {
        texts: Vec<(String, PixelPoint, Color)>,
        rects: Vec<(PixelRect, Color)>,
        circles: Vec<(PixelPoint, u32, Color)>,
        lines: usize,
        fail_text: bool,
    }

    impl Renderer for RecordingRenderer {
        fn draw_text(
            &mut self,
            _frame: &mut Frame,
            text: &str,
            origin: PixelPoint,
            style: &TextStyle,
        ) -> RenderResult<()> {
            if self.fail_text {
                return Err(RenderError::DrawFailed("no glyphs".to_string()));
            }
            self.texts.push((text.to_string(), origin, style.color));
            Ok(())
        }

        fn fill_rect(&mut self, _frame: &mut Frame, rect: PixelRect, color: Color) -> RenderResult<()> {
            self.rects.push((rect, color));
            Ok(())
        }

        fn fill_circle(
            &mut self,
            _frame: &mut Frame,
            center: PixelPoint,
            radius: u32,
            color: Color,
        ) -> RenderResult<()> {
            self.circles.push((center, radius, color));
            Ok(())
        }

        fn draw_line(
            &mut self,
            _frame: &mut Frame,
            _from: PixelPoint,
            _to: PixelPoint,
            _color: Color,
            _thickness: u32,
        ) -> RenderResult<()> {
            self.lines += 1;
            Ok(())
        }
    }

    fn frame() -> Frame {
        Frame::new(0, RgbaImage::new(640, 480))
    }

    fn pose(visibility: f32) -> BodyPose {
        BodyPose::new([Keypoint3D::new(0.5, 0.25, 0.0, visibility); BODY_LANDMARK_COUNT])
    }

    #[test]
    fn test_progress_bar_geometry() {
        let layout = ProgressBarLayout::new(640, 480, 50.0);

        // 3% wide, 60% tall, at 95% across, vertically centred
        assert_eq!(layout.background.left, 608);
        assert_eq!(layout.background.width(), 19);
        assert_eq!(layout.background.top, 96);
        assert_eq!(layout.background.height(), 288);

        let fill = layout.fill.unwrap();
        assert_eq!(fill.bottom, 384);
        assert_eq!(fill.height(), 144);

        assert_eq!(layout.label, "50%");
        assert_eq!(layout.label_origin, PixelPoint::new(558, 414));
    }

    #[test]
    fn test_progress_bar_extremes() {
        let empty = ProgressBarLayout::new(640, 480, 0.0);
        assert!(empty.fill.is_none());
        assert_eq!(empty.label, "0%");

        let full = ProgressBarLayout::new(640, 480, 100.0);
        assert_eq!(full.fill.unwrap(), full.background);
        assert_eq!(full.label, "100%");

        let truncated = ProgressBarLayout::new(640, 480, 53.846);
        assert_eq!(truncated.label, "53%");
    }

    #[test]
    fn test_counter_text() {
        let mut renderer = RecordingRenderer::default();
        let mut frame = frame();
        let state = RepState {
            stage: Stage::Up,
            count: 7,
            progress: 100.0,
        };

        draw_counters(&mut renderer, &mut frame, &state).unwrap();

        let texts: Vec<&str> = renderer.texts.iter().map(|(t, _, _)| t.as_str()).collect();
        assert_eq!(texts, ["Curls: 7", "Curls: 7", "Stage: up", "Stage: up"]);

        // Shadow first, offset down-right, then the yellow text
        assert_eq!(renderer.texts[0].1, PixelPoint::new(34, 50));
        assert_eq!(renderer.texts[0].2, Color::BLACK);
        assert_eq!(renderer.texts[1].1, PixelPoint::new(32, 48));
        assert_eq!(renderer.texts[1].2, Color::YELLOW);
        assert_eq!(renderer.texts[3].1, PixelPoint::new(32, 432));
    }

    #[test]
    fn test_unknown_stage_label() {
        let mut renderer = RecordingRenderer::default();
        draw_counters(&mut renderer, &mut frame(), &RepState::default()).unwrap();
        assert_eq!(renderer.texts[2].0, "Stage: None");
    }

    #[test]
    fn test_full_overlay_draw_calls() {
        let mut renderer = RecordingRenderer::default();
        let state = RepState {
            stage: Stage::Down,
            count: 1,
            progress: 40.0,
        };

        draw_overlay(&mut renderer, &mut frame(), &state, &pose(0.9)).unwrap();

        assert_eq!(renderer.lines, POSE_CONNECTIONS.len());
        // Background and fill
        assert_eq!(renderer.rects.len(), 2);
        // Every landmark dot plus the highlighted joints
        assert_eq!(renderer.circles.len(), BODY_LANDMARK_COUNT + HIGHLIGHTED_JOINTS.len());

        let highlight = renderer.circles.last().unwrap();
        assert_eq!(*highlight, (PixelPoint::new(320, 120), 5, Color::GREEN));
    }

    #[test]
    fn test_text_failure_keeps_other_sections() {
        let mut renderer = RecordingRenderer {
            fail_text: true,
            ..RecordingRenderer::default()
        };
        let state = RepState {
            stage: Stage::Down,
            count: 1,
            progress: 40.0,
        };

        let result = draw_overlay(&mut renderer, &mut frame(), &state, &pose(0.9));

        assert!(matches!(result, Err(RenderError::DrawFailed(_))));
        assert!(renderer.texts.is_empty());
        assert_eq!(renderer.rects.len(), 2);
        assert_eq!(renderer.lines, POSE_CONNECTIONS.len());
        assert_eq!(renderer.circles.len(), BODY_LANDMARK_COUNT + HIGHLIGHTED_JOINTS.len());
    }

    #[test]
    fn test_low_visibility_skeleton_is_hidden() {
        let mut renderer = RecordingRenderer::default();
        draw_skeleton(&mut renderer, &mut frame(), &pose(0.1)).unwrap();
        assert_eq!(renderer.lines, 0);
        assert!(renderer.circles.is_empty());

        // Highlights ignore visibility
        draw_highlights(&mut renderer, &mut frame(), &pose(0.1)).unwrap();
        assert_eq!(renderer.circles.len(), HIGHLIGHTED_JOINTS.len());
    }
}
