// SPDX-License-Identifier: GPL-3.0-only

//! Active camera facing, shared between the UI and render threads

use crate::backends::camera::{CameraSwitcher, Facing};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

/// Logical camera selection
///
/// Cloning yields another handle to the same selection. The UI thread
/// writes through [`CameraSelector::set_facing`]; the render thread reads
/// once per frame. Readers may see the previous value for one frame.
#[derive(Clone)]
pub struct CameraSelector {
    front: Arc<AtomicBool>,
    switcher: Option<Arc<dyn CameraSwitcher>>,
}

impl CameraSelector {
    /// Selector starting on the back camera, with no device collaborator
    pub fn new() -> Self {
        Self::with_facing(Facing::Back)
    }

    pub fn with_facing(facing: Facing) -> Self {
        Self {
            front: Arc::new(AtomicBool::new(facing.is_front())),
            switcher: None,
        }
    }

    /// Attach the device collaborator asked to switch cameras on change
    pub fn with_switcher(mut self, switcher: Arc<dyn CameraSwitcher>) -> Self {
        self.switcher = Some(switcher);
        self
    }

    /// Select the front (`true`) or back camera
    pub fn set_facing(&self, front: bool) {
        let previous = self.front.swap(front, Ordering::SeqCst);
        if previous == front {
            debug!(front, "Camera facing unchanged");
            return;
        }

        let facing = Facing::from_front(front);
        info!(%facing, "Camera facing changed");
        if let Some(switcher) = &self.switcher {
            switcher.switch_to(facing);
        }
    }

    /// Flip between front and back, returning the new facing
    pub fn toggle(&self) -> Facing {
        let next = self.facing().toggled();
        self.set_facing(next.is_front());
        next
    }

    pub fn facing(&self) -> Facing {
        Facing::from_front(self.front.load(Ordering::SeqCst))
    }
}

impl Default for CameraSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CameraSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraSelector")
            .field("facing", &self.facing())
            .field("has_switcher", &self.switcher.is_some())
            .finish()
    }
}
