// SPDX-License-Identifier: GPL-3.0-only

//! FPS delivery off the render thread
//!
//! The render thread never touches the display. It posts [`FpsSample`]s to
//! a [`DisplayHandle`]; a single consumer task owns the [`DisplayTarget`]
//! and applies them. The handle may not exist yet when a report is due, so
//! the reporter resolves it on demand and drops reports while none exists.

use super::frame_clock::FpsSample;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tracing::{debug, info, trace};

/// Whatever shows the FPS value to the user
pub trait DisplayTarget: Send + 'static {
    fn show_fps(&mut self, sample: FpsSample);
}

impl<F> DisplayTarget for F
where
    F: FnMut(FpsSample) + Send + 'static,
{
    fn show_fps(&mut self, sample: FpsSample) {
        self(sample)
    }
}

/// Sending side of a display task
#[derive(Debug, Clone)]
pub struct DisplayHandle {
    tx: mpsc::UnboundedSender<FpsSample>,
}

impl DisplayHandle {
    /// Queue a sample for the display task without blocking
    ///
    /// Returns `false` if the display task is gone.
    pub fn post(&self, sample: FpsSample) -> bool {
        self.tx.send(sample).is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Create a display channel; feed the receiver to [`run_display`]
pub fn display_channel() -> (DisplayHandle, mpsc::UnboundedReceiver<FpsSample>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (DisplayHandle { tx }, rx)
}

/// Apply samples to `target` until every handle is dropped
pub async fn run_display<T: DisplayTarget>(
    mut rx: mpsc::UnboundedReceiver<FpsSample>,
    mut target: T,
) -> T {
    while let Some(sample) = rx.recv().await {
        target.show_fps(sample);
    }
    debug!("Display task finished");
    target
}

/// Spawn the display task on the current tokio runtime
pub fn spawn_display<T: DisplayTarget>(target: T) -> (DisplayHandle, tokio::task::JoinHandle<T>) {
    let (handle, rx) = display_channel();
    let task = tokio::spawn(run_display(rx, target));
    (handle, task)
}

/// Looks up the display handle on demand
pub trait DisplayResolver: Send + Sync {
    fn resolve(&self) -> Option<DisplayHandle>;
}

/// Attachment point the UI fills once its display exists
#[derive(Debug, Clone, Default)]
pub struct DisplaySlot {
    handle: Arc<Mutex<Option<DisplayHandle>>>,
}

impl DisplaySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&self, handle: DisplayHandle) {
        *self.lock() = Some(handle);
    }

    pub fn detach(&self) {
        *self.lock() = None;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<DisplayHandle>> {
        self.handle
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl DisplayResolver for DisplaySlot {
    fn resolve(&self) -> Option<DisplayHandle> {
        self.lock().clone()
    }
}

/// What happened to a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutcome {
    /// Queued for the display task
    Dispatched,
    /// No display was attached; the sample was discarded
    Dropped,
}

/// Render-thread side of FPS delivery
pub struct MetricReporter {
    resolver: Option<Arc<dyn DisplayResolver>>,
    target: Option<DisplayHandle>,
    dropped: u64,
}

impl MetricReporter {
    pub fn new(resolver: Arc<dyn DisplayResolver>) -> Self {
        Self {
            resolver: Some(resolver),
            target: None,
            dropped: 0,
        }
    }

    /// Reporter with nowhere to deliver; every sample is dropped
    pub fn detached() -> Self {
        Self {
            resolver: None,
            target: None,
            dropped: 0,
        }
    }

    /// Deliver `sample` if a display is attached
    ///
    /// A missing or closed display is looked up again first; the sample is
    /// dropped only when nothing is attached at that point.
    pub fn report(&mut self, sample: FpsSample) -> ReportOutcome {
        info!(fps = sample.value, "Frame rate");

        if self.target.as_ref().is_none_or(|h| h.is_closed()) {
            if self.target.take().is_some() {
                debug!("Display task closed, detaching");
            }
            self.target = self
                .resolver
                .as_ref()
                .and_then(|r| r.resolve())
                .filter(|h| !h.is_closed());
            if self.target.is_some() {
                debug!("Display target attached");
            }
        }

        if let Some(target) = &self.target {
            if target.post(sample) {
                trace!(fps = sample.value, "FPS sample dispatched");
                return ReportOutcome::Dispatched;
            }
            // Closed between lookup and post
            debug!("Display task closed, detaching");
            self.target = None;
        } else {
            debug!("No display target attached");
        }

        self.dropped += 1;
        ReportOutcome::Dropped
    }

    pub fn is_attached(&self) -> bool {
        self.target.is_some()
    }

    /// Reports dropped since creation
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl std::fmt::Debug for MetricReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricReporter")
            .field("attached", &self.target.is_some())
            .field("dropped", &self.dropped)
            .finish()
    }
}
