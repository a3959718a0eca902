// SPDX-License-Identifier: GPL-3.0-only

//! User configuration
//!
//! Stored as JSON under the platform config directory. A missing file yields
//! the defaults; unknown or absent fields fall back to their defaults too.

use crate::backends::camera::{Facing, PreviewSize};
use crate::constants::{self, metrics, preview, timing};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Frames per FPS reporting window
    pub report_window_frames: u32,
    /// Start with the front-facing camera selected
    pub front_facing: bool,
    /// Requested preview width
    pub preview_width: u32,
    /// Requested preview height
    pub preview_height: u32,
    /// Frame rate of the synthetic camera used by the demo binary
    pub source_fps: u32,
    /// Interval of the processing perf meter in milliseconds
    pub perf_meter_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            report_window_frames: metrics::REPORT_WINDOW_FRAMES,
            front_facing: false, // Back camera, like the platform default
            preview_width: preview::DEFAULT_WIDTH,
            preview_height: preview::DEFAULT_HEIGHT,
            source_fps: timing::DEFAULT_SOURCE_FPS,
            perf_meter_interval_ms: metrics::PERF_METER_INTERVAL_MS,
        }
    }
}

impl Config {
    /// Default location of the config file, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| {
            dir.join(constants::CONFIG_DIR_NAME)
                .join(constants::CONFIG_FILE_NAME)
        })
    }

    /// Load the config from `path`, or from [`Config::default_path`] when `None`
    ///
    /// An explicit path that does not exist is an error; a missing file at
    /// the default location is not.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match Self::default_path() {
                Some(p) => (p, false),
                None => {
                    debug!("No platform config directory, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        if !path.exists() {
            if explicit {
                return Err(AppError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config = Self::from_json(&contents)?;
        info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Parse a config from JSON and normalize out-of-range values
    pub fn from_json(json: &str) -> AppResult<Self> {
        let config: Config = serde_json::from_str(json)?;
        Ok(config.normalized())
    }

    /// Clamp values the pipeline cannot work with
    pub fn normalized(mut self) -> Self {
        self.report_window_frames = self.report_window_frames.max(1);
        self.source_fps = self.source_fps.max(1);
        self.perf_meter_interval_ms = self.perf_meter_interval_ms.max(1);
        self
    }

    /// Initial camera facing
    pub fn initial_facing(&self) -> Facing {
        Facing::from_front(self.front_facing)
    }

    /// Requested preview size in the signed form camera APIs use
    pub fn preview_request(&self) -> AppResult<PreviewSize> {
        let convert = |name: &str, value: u32| {
            i32::try_from(value)
                .map_err(|_| AppError::Config(format!("{} out of range: {}", name, value)))
        };
        Ok(PreviewSize {
            width: convert("preview_width", self.preview_width)?,
            height: convert("preview_height", self.preview_height)?,
        })
    }
}
