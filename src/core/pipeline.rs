// Frame loop: capture -> pose -> angle -> counter -> overlay -> display
//
// Strictly one frame at a time. Per-frame failures are logged and the loop
// moves on; only a failing camera ends the session early.

use crate::core::angle::elbow_angle;
use crate::core::overlay::draw_overlay;
use crate::core::rep_counter::RepCounter;
use crate::models::capture::Frame;
use crate::models::pose::ArmSide;
use crate::models::render::KeyPress;
use crate::models::rep::{RepState, RepThresholds};
use crate::models::session::{SessionSummary, StopReason};
use crate::platform::{Camera, Display, PoseEstimator, Renderer};

/// Settings the loop needs from the application config
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineSettings {
    pub arm: ArmSide,
    pub thresholds: RepThresholds,
    pub min_landmark_visibility: f32,
    pub quit_key: char,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            arm: ArmSide::Left,
            thresholds: RepThresholds::default(),
            min_landmark_visibility: 0.0,
            quit_key: 'q',
        }
    }
}

/// What happened to a single frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// Arm found; the counter consumed this angle
    Counted { angle: f64, state: RepState },
    /// No person, partial detection, or the estimator failed
    MissingLandmarks,
}

pub struct FramePipeline<C, P, R, D> {
    camera: C,
    estimator: P,
    renderer: R,
    display: D,
    counter: RepCounter,
    settings: PipelineSettings,
    summary: SessionSummary,
}

impl<C, P, R, D> FramePipeline<C, P, R, D>
where
    C: Camera,
    P: PoseEstimator,
    R: Renderer,
    D: Display,
{
    pub fn new(camera: C, estimator: P, renderer: R, display: D, settings: PipelineSettings) -> Self {
        Self {
            camera,
            estimator,
            renderer,
            display,
            counter: RepCounter::new(settings.thresholds),
            settings,
            summary: SessionSummary::start(),
        }
    }

    pub fn state(&self) -> &RepState {
        self.counter.state()
    }

    pub fn summary(&self) -> &SessionSummary {
        &self.summary
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Run until the quit key, end of stream, or a capture failure
    pub fn run(&mut self) -> SessionSummary {
        log::info!(
            "Session {} started: camera={}, model={}, arm={}",
            self.summary.session_id,
            self.camera.describe(),
            self.estimator.model_info(),
            self.settings.arm
        );

        let reason = loop {
            let mut frame = match self.camera.next_frame() {
                Ok(Some(frame)) => frame,
                Ok(None) => break StopReason::EndOfStream,
                Err(e) => {
                    log::warn!("Capture failed, stopping: {}", e);
                    break StopReason::CaptureFailure;
                }
            };

            self.process_frame(&mut frame);

            match self.display.show(&frame) {
                Ok(Some(key)) if self.is_quit(key) => {
                    log::info!("Quit key pressed at frame {}", frame.index);
                    break StopReason::QuitKey;
                }
                Ok(_) => {}
                Err(e) => log::warn!("Failed to display frame {}: {}", frame.index, e),
            }
        };

        self.summary.finish(reason);
        log::info!(
            "Session {} stopped ({:?}): {} reps over {} frames, {} without a usable pose",
            self.summary.session_id,
            reason,
            self.summary.reps,
            self.summary.frames_processed,
            self.summary.frames_skipped
        );
        self.summary.clone()
    }

    /// Estimate, count and annotate one frame in place
    pub fn process_frame(&mut self, frame: &mut Frame) -> FrameOutcome {
        let pose = match self.estimator.estimate(frame) {
            Ok(pose) => pose,
            Err(e) => {
                log::warn!("Pose estimation failed on frame {}: {}", frame.index, e);
                None
            }
        };

        let Some((pose, arm)) = pose.and_then(|pose| {
            let arm = pose.arm(self.settings.arm, self.settings.min_landmark_visibility)?;
            Some((pose, arm))
        }) else {
            log::debug!("Frame {}: landmarks missing, skipped", frame.index);
            self.summary.record_skipped();
            return FrameOutcome::MissingLandmarks;
        };

        let angle = elbow_angle(&arm);
        self.counter.update(angle);
        let state = *self.counter.state();
        self.summary.record_counted(&state);

        log::trace!(
            "Frame {}: angle {:.1}, stage {}, count {}, progress {:.1}",
            frame.index,
            angle,
            state.stage,
            state.count,
            state.progress
        );

        if let Err(e) = draw_overlay(&mut self.renderer, frame, &state, &pose) {
            log::warn!("Failed to draw overlay on frame {}: {}", frame.index, e);
        }

        FrameOutcome::Counted { angle, state }
    }

    fn is_quit(&self, key: KeyPress) -> bool {
        match key {
            KeyPress::Char(c) => c.eq_ignore_ascii_case(&self.settings.quit_key),
            KeyPress::Escape => false,
        }
    }
}
