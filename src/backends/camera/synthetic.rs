// SPDX-License-Identifier: GPL-3.0-only

//! Synthetic camera for the demo harness
//!
//! Advertises one back and one front camera, hands out a fixed texture pair
//! per facing and paces frames at a target rate.

use super::types::{CameraDescriptor, Facing, FrameHandle, PreviewSize, StreamConfiguration, TextureId};
use super::{CameraPermission, CameraSwitcher, PermissionStatus};
use crate::constants::preview::FORMAT_YUV_420_888;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::{Duration, Instant};
use tracing::info;

/// Sizes advertised by both synthetic cameras
const ADVERTISED_SIZES: [(i32, i32); 5] = [
    (640, 480),
    (1280, 720),
    (1920, 1080),
    (2560, 1440),
    (3840, 2160),
];

struct SyntheticState {
    front: AtomicBool,
    switches: AtomicU32,
}

/// Demo camera device
#[derive(Clone)]
pub struct SyntheticCamera {
    state: Arc<SyntheticState>,
}

impl SyntheticCamera {
    pub fn new(initial: Facing) -> Self {
        Self {
            state: Arc::new(SyntheticState {
                front: AtomicBool::new(initial.is_front()),
                switches: AtomicU32::new(0),
            }),
        }
    }

    /// Cameras advertised by the device
    pub fn cameras(&self) -> Vec<CameraDescriptor> {
        let configs: Vec<StreamConfiguration> = ADVERTISED_SIZES
            .iter()
            .map(|&(w, h)| StreamConfiguration::output(FORMAT_YUV_420_888, w, h))
            .collect();

        vec![
            CameraDescriptor {
                id: "0".to_string(),
                facing: Facing::Back,
                stream_configs: configs.clone(),
            },
            CameraDescriptor {
                id: "1".to_string(),
                facing: Facing::Front,
                stream_configs: configs,
            },
        ]
    }

    /// Facing of the device currently streaming
    pub fn active_facing(&self) -> Facing {
        Facing::from_front(self.state.front.load(Ordering::SeqCst))
    }

    /// Number of physical device switches performed
    pub fn switch_count(&self) -> u32 {
        self.state.switches.load(Ordering::SeqCst)
    }

    /// Frame source bound to this device
    pub fn frames(&self, size: PreviewSize, fps: u32) -> FrameSource {
        FrameSource {
            camera: self.clone(),
            size,
            frame_interval: Duration::from_secs(1) / fps.max(1),
            next_deadline: None,
        }
    }

    /// Texture pair bound to the device facing `facing`
    fn textures(facing: Facing) -> (TextureId, TextureId) {
        match facing {
            Facing::Back => (TextureId(1), TextureId(2)),
            Facing::Front => (TextureId(3), TextureId(4)),
        }
    }
}

impl CameraSwitcher for SyntheticCamera {
    fn switch_to(&self, facing: Facing) {
        let previous = self.state.front.swap(facing.is_front(), Ordering::SeqCst);
        if previous != facing.is_front() {
            self.state.switches.fetch_add(1, Ordering::SeqCst);
            info!(%facing, "Synthetic camera switched device");
        }
    }
}

impl CameraPermission for SyntheticCamera {
    fn status(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }
}

/// Paced stream of texture-bound frames
pub struct FrameSource {
    camera: SyntheticCamera,
    size: PreviewSize,
    frame_interval: Duration,
    next_deadline: Option<Instant>,
}

impl FrameSource {
    /// Block until the next frame is due and return it
    pub fn next_frame(&mut self) -> FrameHandle {
        let now = Instant::now();
        let deadline = self.next_deadline.unwrap_or(now);
        if deadline > now {
            std::thread::sleep(deadline - now);
        }
        // Late frames do not accumulate a backlog
        self.next_deadline = Some(deadline.max(now) + self.frame_interval);

        let (input, output) = SyntheticCamera::textures(self.camera.active_facing());
        FrameHandle::new(input, output, self.size.width, self.size.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch_changes_textures() {
        let camera = SyntheticCamera::new(Facing::Back);
        let mut frames = camera.frames(PreviewSize { width: 64, height: 48 }, 1000);

        let back = frames.next_frame();
        camera.switch_to(Facing::Front);
        let front = frames.next_frame();

        assert_ne!(back.input_texture, front.input_texture);
        assert_eq!(front.width, 64);
        assert_eq!(camera.switch_count(), 1);
    }

    #[test]
    fn test_redundant_switch_is_not_counted() {
        let camera = SyntheticCamera::new(Facing::Front);
        camera.switch_to(Facing::Front);
        assert_eq!(camera.switch_count(), 0);
    }

    #[test]
    fn test_advertises_both_facings() {
        let cameras = SyntheticCamera::new(Facing::Back).cameras();
        assert!(cameras.iter().any(|c| c.facing == Facing::Front));
        assert!(cameras.iter().any(|c| c.facing == Facing::Back));
    }
}
