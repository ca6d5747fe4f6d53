// Replays landmark results recorded from a MediaPipe inference run
//
// One JSON object per line:
//   {"body_pose": {"keypoints": [{"x": .., "y": .., "z": .., "visibility": ..}, ...]}}
//   {"body_pose": null}

use super::PoseEstimator;
use crate::models::capture::Frame;
use crate::models::pose::{BodyPose, Keypoint3D, PoseError, PoseResult};
use serde::Deserialize;
use std::collections::VecDeque;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RecordedFrame {
    #[serde(default)]
    body_pose: Option<RecordedBodyPose>,
}

#[derive(Debug, Deserialize)]
struct RecordedBodyPose {
    keypoints: Vec<Keypoint3D>,
}

pub struct ReplayPoseEstimator {
    source: String,
    records: VecDeque<Option<BodyPose>>,
    total: usize,
}

impl ReplayPoseEstimator {
    pub fn open(path: impl AsRef<Path>) -> PoseResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            PoseError::ModelLoadFailed(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let mut estimator = Self::from_json_lines(&contents)?;
        estimator.source = path.display().to_string();
        Ok(estimator)
    }

    pub fn from_json_lines(contents: &str) -> PoseResult<Self> {
        let mut records = VecDeque::new();
        let mut partial = 0usize;

        for (line_no, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let recorded: RecordedFrame =
                serde_json::from_str(line).map_err(|e| PoseError::InvalidRecord {
                    line: line_no + 1,
                    reason: e.to_string(),
                })?;

            let pose = recorded.body_pose.and_then(|bp| {
                let pose = BodyPose::from_keypoints(&bp.keypoints);
                if pose.is_none() {
                    partial += 1;
                }
                pose
            });
            records.push_back(pose);
        }

        if partial > 0 {
            log::debug!("{} recorded frame(s) hold a partial detection", partial);
        }

        let total = records.len();
        Ok(Self {
            source: "inline recording".to_string(),
            records,
            total,
        })
    }

    /// Number of frames in the recording
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

impl PoseEstimator for ReplayPoseEstimator {
    fn estimate(&mut self, frame: &Frame) -> PoseResult<Option<BodyPose>> {
        match self.records.pop_front() {
            Some(pose) => Ok(pose),
            None => {
                log::trace!("Recording exhausted at frame {}", frame.index);
                Ok(None)
            }
        }
    }

    fn model_info(&self) -> String {
        format!("Landmark replay from {} ({} frames)", self.source, self.total)
    }
}
