// SPDX-License-Identifier: GPL-3.0-only

//! Camera Preview - a real-time camera-to-texture preview pipeline
//!
//! Frames bound to GPU textures are handed, one at a time and on a single
//! render thread, to an external native processing routine before they are
//! presented. Along the way the pipeline measures throughput and reports it
//! to a display off the render thread.
//!
//! # Architecture
//!
//! - [`pipeline`]: render surface controller, frame clock, FPS reporter,
//!   camera selector and the native processing contract
//! - [`backends`]: camera-side collaborators (permission, device switching,
//!   enumeration, render thread, synthetic camera)
//! - [`config`]: user configuration
//!
//! # Example
//!
//! ```no_run
//! use camera_preview::backends::camera::{FrameHandle, StaticPermission, PermissionStatus, TextureId};
//! use camera_preview::pipeline::{CameraSelector, MetricReporter, RenderSurfaceController};
//! use std::sync::Arc;
//!
//! let controller = RenderSurfaceController::new(
//!     |_input: TextureId, _output: TextureId, _w: i32, _h: i32, _front: bool| {},
//!     CameraSelector::new(),
//!     MetricReporter::detached(),
//!     Arc::new(StaticPermission(PermissionStatus::Granted)),
//! );
//! controller.start()?;
//! controller.on_camera_frame(FrameHandle::new(TextureId(1), TextureId(2), 1280, 720));
//! controller.stop()?;
//! # Ok::<(), camera_preview::errors::PipelineError>(())
//! ```

pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod pipeline;

// Re-export commonly used types
pub use backends::camera::{Facing, FrameHandle, TextureId};
pub use config::Config;
pub use errors::{AppError, AppResult, PipelineError, PipelineResult};
pub use pipeline::{CameraSelector, FpsSample, RenderSurfaceController, SurfaceState};
