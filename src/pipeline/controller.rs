// SPDX-License-Identifier: GPL-3.0-only

//! Render surface controller
//!
//! Owns the surface lifecycle and runs the per-frame protocol:
//!
//! ```text
//! frame ─▶ FrameClock::tick ─(window closed)─▶ MetricReporter::report
//!              │
//!              ▼
//!        CameraSelector::facing ─▶ FrameProcessor::process_frame ─▶ present
//! ```
//!
//! Frames arrive on the render thread; lifecycle calls come from the UI
//! thread. Both go through one lock, which the per-frame protocol holds
//! for its whole duration. A stop therefore waits for the frame being
//! processed instead of tearing down textures underneath it.

use super::frame_clock::{FrameClock, MonotonicClock, SystemClock};
use super::processor::FrameProcessor;
use super::reporter::MetricReporter;
use super::selector::CameraSelector;
use crate::backends::camera::{CameraPermission, FrameHandle, PermissionStatus};
use crate::constants::metrics::REPORT_WINDOW_FRAMES;
use crate::errors::{PipelineError, PipelineResult};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, trace, warn};

/// Lifecycle of the rendering surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceState {
    /// Surface exists, camera not started
    Created,
    /// Started, waiting for the first frame
    Started,
    /// Receiving frames
    Running,
    /// Backgrounded; frames are rejected
    Stopped,
    /// Torn down for good
    Destroyed,
}

impl SurfaceState {
    /// States in which frames are accepted
    pub fn is_active(self) -> bool {
        matches!(self, SurfaceState::Started | SurfaceState::Running)
    }
}

impl std::fmt::Display for SurfaceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SurfaceState::Created => "CREATED",
            SurfaceState::Started => "STARTED",
            SurfaceState::Running => "RUNNING",
            SurfaceState::Stopped => "STOPPED",
            SurfaceState::Destroyed => "DESTROYED",
        };
        f.write_str(name)
    }
}

/// Everything the render thread touches per frame
struct SurfaceCore {
    state: SurfaceState,
    frame_clock: FrameClock,
    processor: Box<dyn FrameProcessor>,
    reporter: MetricReporter,
}

/// Drives camera frames through the native processing stage
///
/// Shared between the UI thread and the render thread behind an `Arc`.
pub struct RenderSurfaceController {
    core: Mutex<SurfaceCore>,
    selector: CameraSelector,
    permission: Arc<dyn CameraPermission>,
    clock: Arc<dyn MonotonicClock>,
}

impl RenderSurfaceController {
    /// New controller in [`SurfaceState::Created`]
    pub fn new<P>(
        processor: P,
        selector: CameraSelector,
        reporter: MetricReporter,
        permission: Arc<dyn CameraPermission>,
    ) -> Self
    where
        P: FrameProcessor + 'static,
    {
        let clock: Arc<dyn MonotonicClock> = Arc::new(SystemClock::new());
        let now = clock.now_nanos();

        Self {
            core: Mutex::new(SurfaceCore {
                state: SurfaceState::Created,
                frame_clock: FrameClock::new(REPORT_WINDOW_FRAMES, now),
                processor: Box::new(processor),
                reporter,
            }),
            selector,
            permission,
            clock,
        }
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: Arc<dyn MonotonicClock>) -> Self {
        let now = clock.now_nanos();
        self.core_mut().frame_clock.reset(now);
        self.clock = clock;
        self
    }

    /// Frames per FPS reporting window
    pub fn with_report_window(mut self, frames: u32) -> Self {
        let now = self.clock.now_nanos();
        self.core_mut().frame_clock = FrameClock::new(frames, now);
        self
    }

    /// Surface created or resumed: enter [`SurfaceState::Started`]
    ///
    /// Requires the camera permission. Starting an already active surface
    /// changes nothing.
    pub fn start(&self) -> PipelineResult<()> {
        let mut core = self.lock_core();

        match core.state {
            SurfaceState::Created | SurfaceState::Stopped => {}
            SurfaceState::Started | SurfaceState::Running => {
                debug!(state = %core.state, "Surface already active");
                return Ok(());
            }
            SurfaceState::Destroyed => return Err(PipelineError::Destroyed),
        }

        let permission = self.permission.status();
        if permission != PermissionStatus::Granted {
            warn!(?permission, "Camera permission not granted, surface not started");
            return Err(PipelineError::PermissionDenied);
        }

        let now = self.clock.now_nanos();
        core.frame_clock.reset(now);
        info!(from = %core.state, "Surface started");
        core.state = SurfaceState::Started;
        Ok(())
    }

    /// Handle one camera frame on the render thread
    ///
    /// Returns `true` when the frame went through the native stage and the
    /// output texture should be presented. Frames with a non-positive size
    /// or arriving while the surface is inactive are skipped untouched.
    pub fn on_camera_frame(&self, frame: FrameHandle) -> bool {
        let mut core = self.lock_core();

        if !core.state.is_active() {
            trace!(state = %core.state, "Frame outside active surface, skipped");
            return false;
        }
        if !frame.has_valid_size() {
            debug!(width = frame.width, height = frame.height, "Invalid frame size, skipped");
            return false;
        }
        if core.state == SurfaceState::Started {
            info!(width = frame.width, height = frame.height, "First camera frame, surface running");
            core.state = SurfaceState::Running;
        }

        let now = self.clock.now_nanos();
        if let Some(sample) = core.frame_clock.tick(now) {
            core.reporter.report(sample);
        }

        let front_facing = self.selector.facing().is_front();
        core.processor.process_frame(
            frame.input_texture,
            frame.output_texture,
            frame.width,
            frame.height,
            front_facing,
        );
        true
    }

    /// App backgrounded: enter [`SurfaceState::Stopped`]
    ///
    /// Blocks until a frame in progress on the render thread has finished.
    pub fn stop(&self) -> PipelineResult<()> {
        let mut core = self.lock_core();

        match core.state {
            SurfaceState::Started | SurfaceState::Running => {
                info!(from = %core.state, "Surface stopped");
                core.state = SurfaceState::Stopped;
                Ok(())
            }
            SurfaceState::Stopped => Ok(()),
            SurfaceState::Created => Err(PipelineError::InvalidTransition {
                from: SurfaceState::Created,
                to: SurfaceState::Stopped,
            }),
            SurfaceState::Destroyed => Err(PipelineError::Destroyed),
        }
    }

    /// Tear the surface down
    ///
    /// An active surface is drained through [`SurfaceState::Stopped`] first.
    pub fn destroy(&self) -> PipelineResult<()> {
        let mut core = self.lock_core();

        match core.state {
            SurfaceState::Destroyed => return Ok(()),
            SurfaceState::Started | SurfaceState::Running => {
                debug!(from = %core.state, "Stopping active surface before teardown");
            }
            SurfaceState::Created | SurfaceState::Stopped => {}
        }

        info!(
            dropped_reports = core.reporter.dropped(),
            "Surface destroyed"
        );
        core.state = SurfaceState::Destroyed;
        Ok(())
    }

    pub fn state(&self) -> SurfaceState {
        self.lock_core().state
    }

    /// Frames counted in the current reporting window
    pub fn frame_count(&self) -> u32 {
        self.lock_core().frame_clock.frame_count()
    }

    /// Monotonic start of the current reporting window (nanoseconds)
    pub fn window_start(&self) -> u64 {
        self.lock_core().frame_clock.window_start()
    }

    /// Handle to the camera selection read by every frame
    pub fn selector(&self) -> &CameraSelector {
        &self.selector
    }

    /// A panic in the native stage poisons the lock; lifecycle calls must
    /// still be able to stop and tear down afterwards.
    fn lock_core(&self) -> MutexGuard<'_, SurfaceCore> {
        self.core.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn core_mut(&mut self) -> &mut SurfaceCore {
        self.core.get_mut().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for RenderSurfaceController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let core = self.lock_core();
        f.debug_struct("RenderSurfaceController")
            .field("state", &core.state)
            .field("frame_count", &core.frame_clock.frame_count())
            .field("selector", &self.selector)
            .field("reporter", &core.reporter)
            .finish()
    }
}
