// Command line surface: picks collaborators from flags and config, runs one session

use crate::core::config::Config;
use crate::core::pipeline::{FramePipeline, PipelineSettings};
use crate::models::pose::ArmSide;
use crate::models::session::SessionSummary;
use crate::platform::capture::{BlankCamera, ImageSequenceCamera};
use crate::platform::display::{HeadlessDisplay, ImageDirectoryDisplay, KeyboardDisplay};
use crate::platform::pose::{NullPoseEstimator, ReplayPoseEstimator};
use crate::platform::render::PixmapRenderer;
use crate::platform::{Camera, Display, PoseEstimator};
use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ArmArg {
    Left,
    Right,
}

impl From<ArmArg> for ArmSide {
    fn from(arm: ArmArg) -> Self {
        match arm {
            ArmArg::Left => ArmSide::Left,
            ArmArg::Right => ArmSide::Right,
        }
    }
}

/// Count bicep curls from a frame source and a pose landmark stream
#[derive(Debug, Parser)]
#[command(name = "curlcount", version, about)]
pub struct Cli {
    /// Settings file (default: ~/.curlcount/config/settings.json)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory of images to use as camera frames
    #[arg(long, value_name = "DIR")]
    pub frames: Option<PathBuf>,

    /// JSON-lines landmark recording, one record per frame
    #[arg(long, value_name = "FILE")]
    pub landmarks: Option<PathBuf>,

    /// Write annotated frames here as PNGs
    #[arg(long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Read keys from the terminal; type the quit key and Enter to stop
    #[arg(long)]
    pub interactive: bool,

    /// Arm to track, overriding the config
    #[arg(long, value_enum)]
    pub arm: Option<ArmArg>,

    /// Blank frames to generate when no --frames directory is given
    /// (default: one per landmark record)
    #[arg(long, value_name = "N")]
    pub frame_count: Option<u64>,
}

impl Cli {
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => Config::load().context("Failed to load config")?,
        };

        if let Some(arm) = self.arm {
            config.tracked_arm = arm.into();
        }

        Ok(config)
    }
}

/// Build the collaborators described by `cli` and `config`, then run to completion
pub fn run_session(cli: &Cli, config: &Config) -> anyhow::Result<SessionSummary> {
    let surface = open_surface(cli)?;
    let display: Box<dyn Display> = if cli.interactive {
        log::info!("Type '{}' and Enter to stop", config.quit_key);
        Box::new(KeyboardDisplay::stdin(surface))
    } else {
        surface
    };
    run_session_with_display(cli, config, display)
}

fn open_surface(cli: &Cli) -> anyhow::Result<Box<dyn Display>> {
    Ok(match &cli.output {
        Some(dir) => Box::new(
            ImageDirectoryDisplay::create(dir)
                .with_context(|| format!("Failed to create output directory {}", dir.display()))?,
        ),
        None => Box::new(HeadlessDisplay::default()),
    })
}

/// Run a session from the flags in `cli`, showing frames on `display`
pub fn run_session_with_display(
    cli: &Cli,
    config: &Config,
    display: Box<dyn Display>,
) -> anyhow::Result<SessionSummary> {
    let (estimator, records): (Box<dyn PoseEstimator>, usize) = match &cli.landmarks {
        Some(path) => {
            let replay = ReplayPoseEstimator::open(path)
                .with_context(|| format!("Failed to open landmark recording {}", path.display()))?;
            if replay.is_empty() {
                log::warn!("Landmark recording {} holds no records", path.display());
            }
            let records = replay.len();
            (Box::new(replay), records)
        }
        None => (Box::new(NullPoseEstimator), 0),
    };

    let camera: Box<dyn Camera> = match &cli.frames {
        Some(dir) => {
            let sequence = ImageSequenceCamera::open(dir)
                .with_context(|| format!("Failed to open frame directory {}", dir.display()))?;
            if sequence.is_empty() {
                log::warn!("No frames found in {}", dir.display());
            } else if records > 0 && records != sequence.len() {
                log::warn!(
                    "{} frames but {} landmark records; extra frames count as missing landmarks",
                    sequence.len(),
                    records
                );
            }
            Box::new(sequence)
        }
        None => {
            let count = cli.frame_count.unwrap_or(records as u64);
            Box::new(BlankCamera::new(config.frame_width, config.frame_height, count))
        }
    };

    let settings = PipelineSettings {
        arm: config.tracked_arm,
        thresholds: config.thresholds,
        min_landmark_visibility: config.min_landmark_visibility,
        quit_key: config.quit_key,
    };

    let mut pipeline = FramePipeline::new(camera, estimator, PixmapRenderer::new(), display, settings);
    Ok(pipeline.run())
}
