// Per-run statistics reported when the frame loop stops

use crate::models::rep::{RepState, Stage};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Why the frame loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    QuitKey,
    EndOfStream,
    CaptureFailure,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub frames_processed: u64,
    pub frames_with_pose: u64,
    pub frames_skipped: u64,
    pub reps: u32,
    pub final_stage: Stage,
    /// Share of processed frames where the tracked arm was usable (0.0-1.0)
    pub detection_rate: f32,
    pub stop_reason: Option<StopReason>,
}

impl SessionSummary {
    pub fn start() -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            ended_at: None,
            frames_processed: 0,
            frames_with_pose: 0,
            frames_skipped: 0,
            reps: 0,
            final_stage: Stage::Unknown,
            detection_rate: 0.0,
            stop_reason: None,
        }
    }

    pub fn record_counted(&mut self, state: &RepState) {
        self.frames_processed += 1;
        self.frames_with_pose += 1;
        self.reps = state.count;
        self.final_stage = state.stage;
    }

    pub fn record_skipped(&mut self) {
        self.frames_processed += 1;
        self.frames_skipped += 1;
    }

    pub fn finish(&mut self, reason: StopReason) {
        self.ended_at = Some(Utc::now());
        self.stop_reason = Some(reason);
        self.detection_rate = if self.frames_processed == 0 {
            0.0
        } else {
            self.frames_with_pose as f32 / self.frames_processed as f32
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counters() {
        let mut summary = SessionSummary::start();
        assert_eq!(summary.detection_rate, 0.0);

        let state = RepState {
            stage: Stage::Down,
            count: 2,
            progress: 0.0,
        };
        summary.record_counted(&state);
        summary.record_skipped();
        summary.finish(StopReason::EndOfStream);

        assert_eq!(summary.frames_processed, 2);
        assert_eq!(summary.frames_with_pose, 1);
        assert_eq!(summary.frames_skipped, 1);
        assert_eq!(summary.reps, 2);
        assert_eq!(summary.final_stage, Stage::Down);
        assert_eq!(summary.detection_rate, 0.5);
        assert_eq!(summary.stop_reason, Some(StopReason::EndOfStream));
        assert!(summary.ended_at.is_some());
    }

    #[test]
    fn test_summary_serializes_stop_reason() {
        let mut summary = SessionSummary::start();
        summary.finish(StopReason::QuitKey);
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"quit_key\""));
        assert!(json.contains("\"final_stage\":\"unknown\""));
        // Nothing processed
        assert!(json.contains("\"detection_rate\":0.0"));
    }
}
