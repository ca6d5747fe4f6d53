// Curl counting state machine
//
// One angle per frame drives stage/count/progress. Frames without a usable
// arm must not reach this module; the state then stays as it was.

use crate::models::rep::{RepState, RepThresholds, Stage};

impl RepState {
    /// Apply one frame's elbow angle and return the next state
    pub fn advance(self, angle: f64, thresholds: &RepThresholds) -> RepState {
        if angle > thresholds.extended_angle {
            let count = if self.stage == Stage::Up {
                self.count + 1
            } else {
                self.count
            };
            RepState {
                stage: Stage::Down,
                count,
                progress: 0.0,
            }
        } else if angle < thresholds.curled_angle {
            RepState {
                stage: Stage::Up,
                progress: 100.0,
                ..self
            }
        } else {
            let progress =
                ((thresholds.extended_angle - angle) / thresholds.progress_divisor).clamp(0.0, 100.0);
            RepState { progress, ..self }
        }
    }
}

/// Owns the running [`RepState`] for one session
#[derive(Debug, Clone, Default)]
pub struct RepCounter {
    state: RepState,
    thresholds: RepThresholds,
}

impl RepCounter {
    pub fn new(thresholds: RepThresholds) -> Self {
        Self {
            state: RepState::default(),
            thresholds,
        }
    }

    pub fn state(&self) -> &RepState {
        &self.state
    }

    pub fn thresholds(&self) -> &RepThresholds {
        &self.thresholds
    }

    /// Feed one angle. Returns `true` when this update completed a rep.
    pub fn update(&mut self, angle: f64) -> bool {
        let previous = self.state;
        self.state = previous.advance(angle, &self.thresholds);

        if self.state.stage != previous.stage {
            log::debug!("Stage {} -> {} at {:.1} deg", previous.stage, self.state.stage, angle);
        }

        let completed = self.state.count > previous.count;
        if completed {
            log::info!("Rep {} completed", self.state.count);
        }
        completed
    }
}
