// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the render surface controller

use camera_preview::backends::camera::{FrameHandle, PermissionStatus, StaticPermission, TextureId};
use camera_preview::pipeline::{
    CameraSelector, DisplaySlot, FrameProcessor, ManualClock, MetricReporter,
    RenderSurfaceController, SurfaceState, display_channel,
};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

const SECOND: u64 = 1_000_000_000;

type Call = (TextureId, TextureId, i32, i32, bool);

/// Records every native call
#[derive(Clone, Default)]
struct RecordingProcessor {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl FrameProcessor for RecordingProcessor {
    fn process_frame(
        &mut self,
        input: TextureId,
        output: TextureId,
        width: i32,
        height: i32,
        front: bool,
    ) {
        self.calls.lock().unwrap().push((input, output, width, height, front));
    }
}

/// Blocks inside the native call until released
struct GatedProcessor {
    entered: mpsc::Sender<bool>,
    release: mpsc::Receiver<()>,
    events: Arc<Mutex<Vec<&'static str>>>,
}

impl FrameProcessor for GatedProcessor {
    fn process_frame(&mut self, _: TextureId, _: TextureId, _: i32, _: i32, front: bool) {
        self.events.lock().unwrap().push("enter");
        self.entered.send(front).unwrap();
        self.release.recv().unwrap();
        self.events.lock().unwrap().push("exit");
    }
}

fn granted() -> Arc<StaticPermission> {
    Arc::new(StaticPermission(PermissionStatus::Granted))
}

fn frame(input: i32, output: i32) -> FrameHandle {
    FrameHandle::new(TextureId(input), TextureId(output), 1280, 720)
}

fn recording_controller(clock: &ManualClock) -> (RenderSurfaceController, RecordingProcessor) {
    let processor = RecordingProcessor::default();
    let controller = RenderSurfaceController::new(
        processor.clone(),
        CameraSelector::new(),
        MetricReporter::detached(),
        granted(),
    )
    .with_clock(Arc::new(clock.clone()));
    (controller, processor)
}

#[test]
fn test_one_native_call_per_accepted_frame() {
    let clock = ManualClock::new();
    let (controller, processor) = recording_controller(&clock);
    controller.start().unwrap();

    for i in 0..100 {
        clock.advance(SECOND / 60);
        assert!(controller.on_camera_frame(frame(i, i + 1000)));
    }

    let calls = processor.calls.lock().unwrap();
    assert_eq!(calls.len(), 100);
    for (i, call) in calls.iter().enumerate() {
        let i = i as i32;
        assert_eq!(*call, (TextureId(i), TextureId(i + 1000), 1280, 720, false));
    }
}

#[test]
fn test_frame_count_resets_only_on_report() {
    let clock = ManualClock::new();
    let (controller, _) = recording_controller(&clock);
    controller.start().unwrap();

    for expected in 1..30 {
        controller.on_camera_frame(frame(1, 2));
        assert_eq!(controller.frame_count(), expected);
    }
    controller.on_camera_frame(frame(1, 2));
    assert_eq!(controller.frame_count(), 0);
    controller.on_camera_frame(frame(1, 2));
    assert_eq!(controller.frame_count(), 1);
}

#[test]
fn test_thirty_frames_in_one_second_reports_thirty() {
    let clock = ManualClock::new();
    let slot = DisplaySlot::new();
    let (handle, mut rx) = display_channel();
    slot.attach(handle);

    let controller = RenderSurfaceController::new(
        RecordingProcessor::default(),
        CameraSelector::new(),
        MetricReporter::new(Arc::new(slot)),
        granted(),
    )
    .with_clock(Arc::new(clock.clone()));
    controller.start().unwrap();

    for _ in 0..29 {
        clock.advance(SECOND / 30);
        controller.on_camera_frame(frame(1, 2));
    }
    assert!(rx.try_recv().is_err());

    clock.advance(SECOND / 30);
    controller.on_camera_frame(frame(1, 2));
    assert_eq!(rx.try_recv().unwrap().value, 30);
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_configured_report_window() {
    let clock = ManualClock::new();
    let slot = DisplaySlot::new();
    let (handle, mut rx) = display_channel();
    slot.attach(handle);

    let controller = RenderSurfaceController::new(
        RecordingProcessor::default(),
        CameraSelector::new(),
        MetricReporter::new(Arc::new(slot)),
        granted(),
    )
    .with_clock(Arc::new(clock.clone()))
    .with_report_window(5);
    controller.start().unwrap();

    for expected in 1..5 {
        clock.advance(SECOND / 10);
        controller.on_camera_frame(frame(1, 2));
        assert_eq!(controller.frame_count(), expected);
    }
    assert!(rx.try_recv().is_err());

    // Fifth frame closes a 500ms window
    clock.advance(SECOND / 10);
    controller.on_camera_frame(frame(1, 2));
    assert_eq!(controller.frame_count(), 0);
    assert_eq!(controller.window_start(), SECOND / 2);
    assert_eq!(rx.try_recv().unwrap().value, 10);
}

#[test]
fn test_invalid_size_is_skipped_entirely() {
    let clock = ManualClock::new();
    let (controller, processor) = recording_controller(&clock);
    controller.start().unwrap();
    controller.on_camera_frame(frame(1, 2));

    let window_start = controller.window_start();
    assert!(!controller.on_camera_frame(FrameHandle::new(TextureId(1), TextureId(2), 0, 720)));
    assert!(!controller.on_camera_frame(FrameHandle::new(TextureId(1), TextureId(2), 1280, 0)));

    assert_eq!(processor.calls.lock().unwrap().len(), 1);
    assert_eq!(controller.frame_count(), 1);
    assert_eq!(controller.window_start(), window_start);
}

#[test]
fn test_resume_resets_frame_clock() {
    let clock = ManualClock::new();
    let (controller, _) = recording_controller(&clock);
    controller.start().unwrap();
    for _ in 0..10 {
        clock.advance(SECOND / 30);
        controller.on_camera_frame(frame(1, 2));
    }
    controller.stop().unwrap();

    clock.set(42 * SECOND);
    controller.start().unwrap();
    assert_eq!(controller.state(), SurfaceState::Started);
    assert_eq!(controller.frame_count(), 0);
    assert_eq!(controller.window_start(), 42 * SECOND);
}

#[test]
fn test_toggle_during_native_call_applies_to_next_frame() {
    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel();
    let selector = CameraSelector::new();
    let controller = Arc::new(RenderSurfaceController::new(
        GatedProcessor {
            entered: entered_tx,
            release: release_rx,
            events: Arc::default(),
        },
        selector.clone(),
        MetricReporter::detached(),
        granted(),
    ));
    controller.start().unwrap();

    let render = {
        let controller = Arc::clone(&controller);
        thread::spawn(move || {
            controller.on_camera_frame(frame(1, 2));
            controller.on_camera_frame(frame(1, 2));
        })
    };

    assert!(!entered_rx.recv().unwrap());
    selector.set_facing(true);
    release_tx.send(()).unwrap();

    assert!(entered_rx.recv().unwrap());
    release_tx.send(()).unwrap();
    render.join().unwrap();
}

#[test]
fn test_stop_waits_for_in_flight_frame() {
    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel();
    let events: Arc<Mutex<Vec<&'static str>>> = Arc::default();
    let controller = Arc::new(RenderSurfaceController::new(
        GatedProcessor {
            entered: entered_tx,
            release: release_rx,
            events: Arc::clone(&events),
        },
        CameraSelector::new(),
        MetricReporter::detached(),
        granted(),
    ));
    controller.start().unwrap();

    let render = {
        let controller = Arc::clone(&controller);
        thread::spawn(move || controller.on_camera_frame(frame(1, 2)))
    };
    entered_rx.recv().unwrap();

    let ui = {
        let controller = Arc::clone(&controller);
        let events = Arc::clone(&events);
        thread::spawn(move || {
            controller.stop().unwrap();
            events.lock().unwrap().push("stopped");
        })
    };

    // Stop cannot finish while the native call is blocked
    thread::sleep(Duration::from_millis(50));
    assert_eq!(*events.lock().unwrap(), vec!["enter"]);

    release_tx.send(()).unwrap();
    assert!(render.join().unwrap());
    ui.join().unwrap();

    assert_eq!(*events.lock().unwrap(), vec!["enter", "exit", "stopped"]);
    assert_eq!(controller.state(), SurfaceState::Stopped);
    assert!(!controller.on_camera_frame(frame(1, 2)));
}
