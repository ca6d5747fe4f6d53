// Pose estimation backends
// Any landmark model plugs in behind `PoseEstimator`

pub mod replay;

pub use replay::ReplayPoseEstimator;

use crate::models::capture::Frame;
use crate::models::pose::{BodyPose, PoseResult};

/// Pose estimation collaborator
pub trait PoseEstimator {
    /// Run inference on a frame.
    /// `Ok(None)` means no person (or only part of one) was found.
    fn estimate(&mut self, frame: &Frame) -> PoseResult<Option<BodyPose>>;

    /// Get model info
    fn model_info(&self) -> String;
}

impl<P: PoseEstimator + ?Sized> PoseEstimator for Box<P> {
    fn estimate(&mut self, frame: &Frame) -> PoseResult<Option<BodyPose>> {
        (**self).estimate(frame)
    }

    fn model_info(&self) -> String {
        (**self).model_info()
    }
}

/// Estimator used when no model is configured: never detects anyone
#[derive(Debug, Default)]
pub struct NullPoseEstimator;

impl PoseEstimator for NullPoseEstimator {
    fn estimate(&mut self, _frame: &Frame) -> PoseResult<Option<BodyPose>> {
        Ok(None)
    }

    fn model_info(&self) -> String {
        "No pose model (pass a landmark recording to enable counting)".to_string()
    }
}
