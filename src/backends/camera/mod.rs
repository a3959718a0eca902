// SPDX-License-Identifier: GPL-3.0-only

//! Camera-side collaborators of the preview pipeline
//!
//! The pipeline core never opens devices. It talks to the camera through
//! two small traits:
//!
//! ```text
//! ┌──────────────────────┐   switch_to(facing)   ┌──────────────────┐
//! │    CameraSelector    │ ────────────────────▶ │  CameraSwitcher  │
//! └──────────────────────┘                       └──────────────────┘
//! ┌──────────────────────┐   status()            ┌──────────────────┐
//! │ RenderSurfaceCtrl    │ ────────────────────▶ │ CameraPermission │
//! └──────────────────────┘                       └──────────────────┘
//! ```
//!
//! [`synthetic::SyntheticCamera`] implements both for the demo binary.

pub mod enumeration;
pub mod frame_loop;
pub mod synthetic;
pub mod types;

pub use enumeration::{calc_preview_size, find_camera_id};
pub use frame_loop::{LoopAction, RenderLoop};
pub use types::*;

/// Switches the physical camera device when the logical facing changes
pub trait CameraSwitcher: Send + Sync {
    /// Request the device facing `facing`. Called from the thread that
    /// toggled the selector, never from the render thread.
    fn switch_to(&self, facing: Facing);
}

/// Outcome of the platform's camera authorization check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    /// The user has not answered yet
    Pending,
}

/// Camera authorization check
///
/// Prompting and retrying belong to the platform; the pipeline only asks.
pub trait CameraPermission: Send + Sync {
    fn status(&self) -> PermissionStatus;
}

/// Fixed permission answer, for hosts that authorize up front
#[derive(Debug, Clone, Copy)]
pub struct StaticPermission(pub PermissionStatus);

impl CameraPermission for StaticPermission {
    fn status(&self) -> PermissionStatus {
        self.0
    }
}
