// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use std::time::Duration;

/// Frame-rate instrumentation
pub mod metrics {
    /// Frames per reporting window before an FPS sample is emitted
    pub const REPORT_WINDOW_FRAMES: u32 = 30;

    /// Nanoseconds per second, used for the windowed FPS computation
    pub const NANOS_PER_SEC: f64 = 1e9;

    /// Default interval of the time-based perf meter (milliseconds)
    pub const PERF_METER_INTERVAL_MS: u64 = 1_000;
}

/// Preview stream defaults
pub mod preview {
    /// Requested preview width when nothing is configured
    pub const DEFAULT_WIDTH: u32 = 1920;

    /// Requested preview height when nothing is configured
    pub const DEFAULT_HEIGHT: u32 = 1080;

    /// Maximum aspect ratio difference accepted by preview size selection
    pub const ASPECT_TOLERANCE: f32 = 0.2;

    /// Stream format code for YUV 4:2:0 (flexible) output streams
    pub const FORMAT_YUV_420_888: i32 = 0x23;
}

/// Demo harness timing
pub mod timing {
    use super::Duration;

    /// Default frame rate of the synthetic camera
    pub const DEFAULT_SOURCE_FPS: u32 = 30;

    /// Default run duration of the demo pipeline
    pub const DEFAULT_RUN_SECS: u64 = 5;

    /// Sleep between polls while the render loop waits for a stop request
    pub const STOP_POLL_INTERVAL: Duration = Duration::from_millis(20);
}

/// Name of the config directory under the platform config dir
pub const CONFIG_DIR_NAME: &str = "camera-preview";

/// File name of the JSON config inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.json";
