// SPDX-License-Identifier: GPL-3.0-only
//! Dedicated render thread
//!
//! The render surface controller expects every frame to arrive on one
//! thread. [`RenderLoop`] owns that thread: it calls the per-iteration
//! closure until the closure asks to stop or [`RenderLoop::stop`] is called.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

/// Action returned by the loop body to control the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopAction {
    /// Run another iteration
    Continue,
    /// Leave the loop
    Stop,
}

/// Handle to a running render thread
///
/// # Example
///
/// ```ignore
/// let mut render_loop = RenderLoop::start("preview-render", move || {
///     if let Some(frame) = camera.next_frame() {
///         controller.on_camera_frame(frame);
///     }
///     LoopAction::Continue
/// });
///
/// // Later, from the UI thread
/// render_loop.stop();
/// ```
pub struct RenderLoop {
    thread_handle: Option<JoinHandle<()>>,
    stop_signal: Arc<AtomicBool>,
    name: String,
}

impl RenderLoop {
    /// Spawn the render thread running `body` until stopped
    pub fn start<F>(name: &str, mut body: F) -> Self
    where
        F: FnMut() -> LoopAction + Send + 'static,
    {
        Self::start_with_init(name, || Ok(()), move |_: &mut ()| body())
    }

    /// Spawn the render thread with per-thread state
    ///
    /// `init_fn` runs once on the render thread. If it fails the thread
    /// exits without running `body`.
    pub fn start_with_init<S, I, F>(name: &str, init_fn: I, mut body: F) -> Self
    where
        S: 'static,
        I: FnOnce() -> Result<S, String> + Send + 'static,
        F: FnMut(&mut S) -> LoopAction + Send + 'static,
    {
        let stop_signal = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop_signal);
        let thread_name = name.to_string();

        info!(name = %name, "Starting render loop");

        let thread_handle = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                let mut state = match init_fn() {
                    Ok(s) => s,
                    Err(e) => {
                        warn!(name = %thread_name, error = %e, "Render loop initialization failed");
                        return;
                    }
                };

                while !thread_stop.load(Ordering::SeqCst) {
                    if body(&mut state) == LoopAction::Stop {
                        debug!(name = %thread_name, "Render loop requested stop");
                        break;
                    }
                }

                info!(name = %thread_name, "Render loop exiting");
            });

        let thread_handle = match thread_handle {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!(name = %name, error = %e, "Failed to spawn render thread");
                None
            }
        };

        Self {
            thread_handle,
            stop_signal,
            name: name.to_string(),
        }
    }

    /// Check if the render thread is still running
    pub fn is_running(&self) -> bool {
        self.thread_handle
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }

    /// Signal the loop to stop without waiting
    pub fn request_stop(&self) {
        debug!(name = %self.name, "Requesting render loop stop");
        self.stop_signal.store(true, Ordering::SeqCst);
    }

    /// Signal the loop and wait for the current iteration to finish
    pub fn stop(&mut self) {
        self.request_stop();
        self.join();
    }

    /// Wait for the thread without signalling it
    pub fn join(&mut self) {
        if let Some(handle) = self.thread_handle.take() {
            if let Err(e) = handle.join() {
                warn!(name = %self.name, "Render thread panicked: {:?}", e);
            } else {
                debug!(name = %self.name, "Render thread finished");
            }
        }
    }
}

impl Drop for RenderLoop {
    fn drop(&mut self) {
        if self.thread_handle.is_some() {
            self.stop();
        }
    }
}
