// SPDX-License-Identifier: GPL-3.0-only

//! Camera-to-texture preview pipeline
//!
//! - [`controller`]: surface lifecycle and the per-frame protocol
//! - [`frame_clock`]: frame-count windowed FPS measurement
//! - [`reporter`]: FPS delivery to a display task off the render thread
//! - [`selector`]: front/back camera selection
//! - [`processor`]: native processing hand-off
//! - [`perf_meter`]: time-interval rate logging

pub mod controller;
pub mod frame_clock;
pub mod perf_meter;
pub mod processor;
pub mod reporter;
pub mod selector;

pub use controller::{RenderSurfaceController, SurfaceState};
pub use frame_clock::{FpsSample, FrameClock, ManualClock, MonotonicClock, SystemClock};
pub use perf_meter::PerfMeter;
pub use processor::{FrameProcessor, NativeFrameProcessor, NativeProcessFrameFn};
pub use reporter::{
    DisplayHandle, DisplayResolver, DisplaySlot, DisplayTarget, MetricReporter, ReportOutcome,
    display_channel, run_display, spawn_display,
};
pub use selector::CameraSelector;
