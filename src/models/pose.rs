// Data models for body pose landmarks

use crate::models::geometry::Point2D;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==============================================================================
// Body Landmarks (33 keypoints)
// ==============================================================================

/// Number of landmarks in a MediaPipe body pose
pub const BODY_LANDMARK_COUNT: usize = 33;

/// MediaPipe Pose Landmark indices (33 total)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BodyLandmark {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl BodyLandmark {
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Skeleton edges drawn between landmarks (MediaPipe `POSE_CONNECTIONS`)
pub const POSE_CONNECTIONS: [(BodyLandmark, BodyLandmark); 35] = {
    use BodyLandmark::*;
    [
        // Face
        (Nose, LeftEyeInner),
        (LeftEyeInner, LeftEye),
        (LeftEye, LeftEyeOuter),
        (LeftEyeOuter, LeftEar),
        (Nose, RightEyeInner),
        (RightEyeInner, RightEye),
        (RightEye, RightEyeOuter),
        (RightEyeOuter, RightEar),
        (MouthLeft, MouthRight),
        // Arms and hands
        (LeftShoulder, RightShoulder),
        (LeftShoulder, LeftElbow),
        (LeftElbow, LeftWrist),
        (LeftWrist, LeftPinky),
        (LeftWrist, LeftIndex),
        (LeftWrist, LeftThumb),
        (LeftPinky, LeftIndex),
        (RightShoulder, RightElbow),
        (RightElbow, RightWrist),
        (RightWrist, RightPinky),
        (RightWrist, RightIndex),
        (RightWrist, RightThumb),
        (RightPinky, RightIndex),
        // Torso
        (LeftShoulder, LeftHip),
        (RightShoulder, RightHip),
        (LeftHip, RightHip),
        // Legs and feet
        (LeftHip, LeftKnee),
        (RightHip, RightKnee),
        (LeftKnee, LeftAnkle),
        (RightKnee, RightAnkle),
        (LeftAnkle, LeftHeel),
        (RightAnkle, RightHeel),
        (LeftHeel, LeftFootIndex),
        (RightHeel, RightFootIndex),
        (LeftAnkle, LeftFootIndex),
        (RightAnkle, RightFootIndex),
    ]
};

// ==============================================================================
// Keypoints
// ==============================================================================

/// A 3D keypoint with visibility score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint3D {
    pub x: f32, // Normalized [0, 1] for image coordinates
    pub y: f32, // Normalized [0, 1] for image coordinates
    #[serde(default)]
    pub z: f32, // Depth relative to the hip midpoint
    #[serde(default = "full_visibility")]
    pub visibility: f32, // Likelihood the point is in view [0, 1]
}

fn full_visibility() -> f32 {
    1.0
}

impl Keypoint3D {
    pub fn new(x: f32, y: f32, z: f32, visibility: f32) -> Self {
        Self {
            x,
            y,
            z,
            visibility,
        }
    }

    pub fn is_visible(&self, threshold: f32) -> bool {
        self.visibility >= threshold
    }

    pub fn position(&self) -> Point2D {
        Point2D::new(self.x as f64, self.y as f64)
    }
}

// ==============================================================================
// Body Pose
// ==============================================================================

/// A complete body detection: exactly one keypoint per [`BodyLandmark`]
#[derive(Debug, Clone, PartialEq)]
pub struct BodyPose {
    keypoints: [Keypoint3D; BODY_LANDMARK_COUNT],
}

impl BodyPose {
    pub fn new(keypoints: [Keypoint3D; BODY_LANDMARK_COUNT]) -> Self {
        Self { keypoints }
    }

    /// Build a pose from a detector's keypoint list.
    /// Returns `None` for partial detections.
    pub fn from_keypoints(keypoints: &[Keypoint3D]) -> Option<Self> {
        let keypoints: [Keypoint3D; BODY_LANDMARK_COUNT] = keypoints.try_into().ok()?;
        Some(Self { keypoints })
    }

    pub fn keypoint(&self, landmark: BodyLandmark) -> &Keypoint3D {
        &self.keypoints[landmark.index()]
    }

    pub fn keypoints(&self) -> &[Keypoint3D] {
        &self.keypoints
    }

    /// Shoulder, elbow and wrist of one arm.
    ///
    /// A joint whose visibility falls below `min_visibility` counts as
    /// missing, so the whole arm is reported absent.
    pub fn arm(&self, side: ArmSide, min_visibility: f32) -> Option<ArmLandmarks> {
        let [shoulder, elbow, wrist] = side.joints().map(|lm| self.keypoint(lm));

        if ![shoulder, elbow, wrist]
            .iter()
            .all(|kp| kp.is_visible(min_visibility))
        {
            return None;
        }

        Some(ArmLandmarks {
            shoulder: shoulder.position(),
            elbow: elbow.position(),
            wrist: wrist.position(),
        })
    }
}

/// Which arm is tracked for counting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmSide {
    #[default]
    Left,
    Right,
}

impl ArmSide {
    /// Shoulder, elbow, wrist landmarks for this side
    pub fn joints(self) -> [BodyLandmark; 3] {
        match self {
            ArmSide::Left => [
                BodyLandmark::LeftShoulder,
                BodyLandmark::LeftElbow,
                BodyLandmark::LeftWrist,
            ],
            ArmSide::Right => [
                BodyLandmark::RightShoulder,
                BodyLandmark::RightElbow,
                BodyLandmark::RightWrist,
            ],
        }
    }
}

impl fmt::Display for ArmSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArmSide::Left => f.write_str("left"),
            ArmSide::Right => f.write_str("right"),
        }
    }
}

/// Normalized positions of the three joints that define the elbow angle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmLandmarks {
    pub shoulder: Point2D,
    pub elbow: Point2D,
    pub wrist: Point2D,
}

// ==============================================================================
// Error Types
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum PoseError {
    #[error("Model loading failed: {0}")]
    ModelLoadFailed(String),

    #[error("Inference failed: {0}")]
    InferenceFailed(String),

    #[error("Invalid landmark record on line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PoseResult<T> = Result<T, PoseError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn pose_with(overrides: &[(BodyLandmark, Keypoint3D)]) -> BodyPose {
        let mut keypoints = [Keypoint3D::new(0.5, 0.5, 0.0, 1.0); BODY_LANDMARK_COUNT];
        for (landmark, keypoint) in overrides {
            keypoints[landmark.index()] = *keypoint;
        }
        BodyPose::new(keypoints)
    }

    #[test]
    fn test_keypoint3d_visibility() {
        let keypoint = Keypoint3D::new(0.5, 0.5, 0.0, 0.8);
        assert!(keypoint.is_visible(0.5));
        assert!(keypoint.is_visible(0.7));
        assert!(!keypoint.is_visible(0.9));
    }

    #[test]
    fn test_partial_detection_is_rejected() {
        let keypoints = vec![Keypoint3D::new(0.1, 0.2, 0.0, 1.0); 17];
        assert!(BodyPose::from_keypoints(&keypoints).is_none());

        let keypoints = vec![Keypoint3D::new(0.1, 0.2, 0.0, 1.0); BODY_LANDMARK_COUNT];
        assert!(BodyPose::from_keypoints(&keypoints).is_some());
    }

    #[test]
    fn test_arm_picks_the_requested_side() {
        let pose = pose_with(&[
            (BodyLandmark::LeftShoulder, Keypoint3D::new(0.1, 0.1, 0.0, 1.0)),
            (BodyLandmark::LeftElbow, Keypoint3D::new(0.2, 0.2, 0.0, 1.0)),
            (BodyLandmark::LeftWrist, Keypoint3D::new(0.3, 0.3, 0.0, 1.0)),
            (BodyLandmark::RightElbow, Keypoint3D::new(0.8, 0.6, 0.0, 1.0)),
        ]);

        let left = pose.arm(ArmSide::Left, 0.0).unwrap();
        assert!((left.elbow.x - 0.2).abs() < 1e-6);
        assert!((left.wrist.y - 0.3).abs() < 1e-6);

        let right = pose.arm(ArmSide::Right, 0.0).unwrap();
        assert!((right.elbow.x - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_arm_respects_visibility_gate() {
        let pose = pose_with(&[(BodyLandmark::LeftWrist, Keypoint3D::new(0.3, 0.3, 0.0, 0.2))]);

        assert!(pose.arm(ArmSide::Left, 0.0).is_some());
        assert!(pose.arm(ArmSide::Left, 0.5).is_none());
        assert!(pose.arm(ArmSide::Right, 0.5).is_some());
    }

    #[test]
    fn test_connections_stay_in_range() {
        for (a, b) in POSE_CONNECTIONS {
            assert!(a.index() < BODY_LANDMARK_COUNT);
            assert!(b.index() < BODY_LANDMARK_COUNT);
            assert_ne!(a, b);
        }
    }

    #[test]
    fn test_keypoint_deserialize_defaults() {
        let kp: Keypoint3D = serde_json::from_str(r#"{"x": 0.25, "y": 0.75}"#).unwrap();
        assert_eq!(kp.z, 0.0);
        assert_eq!(kp.visibility, 1.0);
    }
}
