// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for the preview pipeline
//!
//! This module provides command-line functionality for:
//! - Running the pipeline against the synthetic camera
//! - Listing cameras and their preview sizes

use camera_preview::Config;
use camera_preview::backends::camera::synthetic::SyntheticCamera;
use camera_preview::backends::camera::{
    BackendError, CameraPermission, CameraSwitcher, Facing, LoopAction, PreviewSize, RenderLoop,
    TextureId, calc_preview_size, find_camera_id,
};
use camera_preview::constants::preview::FORMAT_YUV_420_888;
use camera_preview::errors::AppResult;
use camera_preview::pipeline::{
    CameraSelector, DisplaySlot, DisplayTarget, FpsSample, FrameProcessor, MetricReporter,
    PerfMeter, RenderSurfaceController, SystemClock, spawn_display,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, info, trace, warn};

/// Options for `camera-preview run`
pub struct RunOptions {
    pub facing: Facing,
    pub duration_secs: u64,
    pub source_fps: u32,
    pub toggle_every_secs: Option<u64>,
}

/// Stand-in for the native routine: counts frames and logs its own rate
struct LoggingProcessor {
    frames: u64,
    meter: PerfMeter,
}

impl FrameProcessor for LoggingProcessor {
    fn process_frame(
        &mut self,
        input: TextureId,
        output: TextureId,
        width: i32,
        height: i32,
        front_facing: bool,
    ) {
        self.frames += 1;
        trace!(frame = self.frames, %input, %output, width, height, front_facing, "Processing frame");
        self.meter.hit();
    }
}

/// Prints FPS samples on the terminal
struct TerminalDisplay {
    shown: u32,
}

impl DisplayTarget for TerminalDisplay {
    fn show_fps(&mut self, sample: FpsSample) {
        self.shown += 1;
        println!("{}", sample);
    }
}

/// Pick the camera for `facing` and its preview size
fn resolve_camera(
    camera: &SyntheticCamera,
    facing: Facing,
    request: PreviewSize,
) -> AppResult<PreviewSize> {
    let cameras = camera.cameras();
    let id = find_camera_id(&cameras, facing)?;
    let descriptor = cameras
        .iter()
        .find(|c| c.id == id)
        .ok_or_else(|| BackendError::DeviceNotFound(id.to_string()))?;

    let size = calc_preview_size(descriptor, FORMAT_YUV_420_888, request.width, request.height)
        .ok_or_else(|| {
            BackendError::FormatNotSupported(format!("no preview size fits {}", request))
        })?;
    Ok(size)
}

/// List cameras and the preview size each would use
pub fn list_cameras(config: &Config) -> AppResult<()> {
    let request = config.preview_request()?;
    let camera = SyntheticCamera::new(Facing::Back);

    println!("Available cameras:");
    println!();
    for descriptor in camera.cameras() {
        let size = calc_preview_size(&descriptor, FORMAT_YUV_420_888, request.width, request.height);
        match size {
            Some(size) => println!("  [{}] {} facing, preview {}", descriptor.id, descriptor.facing, size),
            None => println!("  [{}] {} facing, no matching preview size", descriptor.id, descriptor.facing),
        }
    }
    Ok(())
}

/// Run the pipeline until the duration elapses or Ctrl+C
pub fn run_preview(config: &Config, options: RunOptions) -> AppResult<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run_preview_async(config, options))
}

async fn run_preview_async(config: &Config, options: RunOptions) -> AppResult<()> {
    let initial = options.facing;
    let camera = SyntheticCamera::new(initial);
    let size = resolve_camera(&camera, initial, config.preview_request()?)?;
    info!(%initial, %size, fps = options.source_fps, "Starting preview");

    let stop_requested = Arc::new(AtomicBool::new(false));
    {
        let stop_requested = Arc::clone(&stop_requested);
        if let Err(e) = ctrlc::set_handler(move || stop_requested.store(true, Ordering::SeqCst)) {
            warn!(error = %e, "Failed to install Ctrl+C handler");
        }
    }

    // The display is attached after the surface starts; the reporter looks
    // it up whenever a window closes.
    let slot = DisplaySlot::new();
    let selector = CameraSelector::with_facing(initial)
        .with_switcher(Arc::new(camera.clone()) as Arc<dyn CameraSwitcher>);
    let processor = LoggingProcessor {
        frames: 0,
        meter: PerfMeter::new(
            "native-process",
            Duration::from_millis(config.perf_meter_interval_ms),
            Arc::new(SystemClock::new()),
        ),
    };
    let permission: Arc<dyn CameraPermission> = Arc::new(camera.clone());
    let controller = Arc::new(
        RenderSurfaceController::new(
            processor,
            selector.clone(),
            MetricReporter::new(Arc::new(slot.clone())),
            permission,
        )
        .with_report_window(config.report_window_frames),
    );

    controller.start()?;

    let mut render_loop = {
        let controller = Arc::clone(&controller);
        let mut frames = camera.frames(size, options.source_fps);
        RenderLoop::start("preview-render", move || {
            if !controller.on_camera_frame(frames.next_frame()) {
                debug!(state = %controller.state(), "Frame not presented");
            }
            LoopAction::Continue
        })
    };

    let (display, display_task) = spawn_display(TerminalDisplay { shown: 0 });
    slot.attach(display);

    let started = Instant::now();
    let deadline = started + Duration::from_secs(options.duration_secs);
    let mut next_toggle = options
        .toggle_every_secs
        .map(|secs| started + Duration::from_secs(secs));

    while Instant::now() < deadline && !stop_requested.load(Ordering::SeqCst) {
        tokio::time::sleep(camera_preview::constants::timing::STOP_POLL_INTERVAL).await;

        if let (Some(at), Some(secs)) = (next_toggle, options.toggle_every_secs) {
            if Instant::now() >= at {
                let facing = selector.toggle();
                info!(%facing, "Toggled camera");
                next_toggle = Some(at + Duration::from_secs(secs));
            }
        }
    }

    // Drain the frame in flight before the render thread goes away
    render_loop.request_stop();
    controller.stop()?;
    render_loop.join();
    controller.destroy()?;

    slot.detach();
    drop(controller);
    drop(render_loop);

    match display_task.await {
        Ok(terminal) => info!(
            shown = terminal.shown,
            switches = camera.switch_count(),
            "Preview finished"
        ),
        Err(e) => warn!(error = %e, "Display task failed"),
    }
    Ok(())
}
