use crate::models::pose::ArmSide;
use crate::models::rep::RepThresholds;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const MAX_FRAME_WIDTH: u32 = 7680;
const MAX_FRAME_HEIGHT: u32 = 4320;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine home directory")]
    NoHomeDirectory,

    #[error("Failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Which arm is tracked: "left" or "right"
    pub tracked_arm: ArmSide,
    /// Angle thresholds and progress divisor for the counter
    pub thresholds: RepThresholds,
    /// Arm joints below this visibility count as missing (0.0 disables the gate)
    pub min_landmark_visibility: f32,
    /// Frame size produced by the blank camera
    pub frame_width: u32,
    pub frame_height: u32,
    /// Key that ends the session
    pub quit_key: char,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tracked_arm: ArmSide::Left,
            thresholds: RepThresholds::default(),
            min_landmark_visibility: 0.0,
            frame_width: 640,
            frame_height: 480,
            quit_key: 'q',
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it with defaults if it doesn't exist
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::get_config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            log::info!("No config at {}, writing defaults", config_path.display());
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    /// Load and validate configuration from `path`
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config =
            serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> ConfigResult<()> {
        self.save_to(&Self::get_config_path()?)
    }

    /// Validate, then write pretty JSON to `path`
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        self.validate()?;

        let io_error = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents).map_err(io_error)?;

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        self.thresholds.validate().map_err(ConfigError::Invalid)?;

        if !(0.0..=1.0).contains(&self.min_landmark_visibility) {
            return Err(ConfigError::Invalid(format!(
                "Invalid min landmark visibility: {}. Must be between 0.0 and 1.0",
                self.min_landmark_visibility
            )));
        }

        if self.frame_width == 0 || self.frame_width > MAX_FRAME_WIDTH {
            return Err(ConfigError::Invalid(format!(
                "Invalid frame width: {}. Must be between 1 and {}",
                self.frame_width, MAX_FRAME_WIDTH
            )));
        }

        if self.frame_height == 0 || self.frame_height > MAX_FRAME_HEIGHT {
            return Err(ConfigError::Invalid(format!(
                "Invalid frame height: {}. Must be between 1 and {}",
                self.frame_height, MAX_FRAME_HEIGHT
            )));
        }

        if !self.quit_key.is_ascii_graphic() {
            return Err(ConfigError::Invalid(format!(
                "Invalid quit key: {:?}. Must be a printable ASCII character",
                self.quit_key
            )));
        }

        Ok(())
    }

    /// Reset to default configuration
    pub fn reset() -> ConfigResult<Self> {
        let config = Self::default();
        config.save()?;
        Ok(config)
    }

    /// Get the configuration file path
    pub fn get_config_path() -> ConfigResult<PathBuf> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| ConfigError::NoHomeDirectory)?;

        let mut path = PathBuf::from(home);
        path.push(".curlcount");
        path.push("config");
        path.push("settings.json");

        Ok(path)
    }
}
