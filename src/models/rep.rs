// Data models for the curl counter state

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the tracked arm is in a curl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// No posture classified yet
    #[default]
    Unknown,
    /// Arm extended
    Down,
    /// Arm fully curled
    Up,
}

impl Stage {
    /// Label shown in the overlay
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Unknown => "None",
            Stage::Down => "down",
            Stage::Up => "up",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Counter state after the most recent processed frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RepState {
    pub stage: Stage,
    pub count: u32,
    pub progress: f64, // Display value in [0, 100]
}

/// Angle limits that drive the stage transitions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RepThresholds {
    /// Above this angle (degrees) the arm counts as extended
    pub extended_angle: f64,
    /// Below this angle (degrees) the arm counts as curled
    pub curled_angle: f64,
    /// Degrees per progress percent in the mid range
    pub progress_divisor: f64,
}

impl Default for RepThresholds {
    fn default() -> Self {
        Self {
            extended_angle: 160.0,
            curled_angle: 30.0,
            progress_divisor: 1.3,
        }
    }
}

impl RepThresholds {
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=180.0).contains(&self.extended_angle) {
            return Err(format!(
                "Invalid extended angle: {}. Must be between 0 and 180",
                self.extended_angle
            ));
        }

        if !(0.0..=180.0).contains(&self.curled_angle) {
            return Err(format!(
                "Invalid curled angle: {}. Must be between 0 and 180",
                self.curled_angle
            ));
        }

        if self.curled_angle >= self.extended_angle {
            return Err(format!(
                "Curled angle ({}) must be below extended angle ({})",
                self.curled_angle, self.extended_angle
            ));
        }

        if !(self.progress_divisor > 0.0 && self.progress_divisor.is_finite()) {
            return Err(format!(
                "Invalid progress divisor: {}. Must be a positive number",
                self.progress_divisor
            ));
        }

        Ok(())
    }
}
