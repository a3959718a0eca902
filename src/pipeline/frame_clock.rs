// SPDX-License-Identifier: GPL-3.0-only

//! Windowed frame-rate measurement
//!
//! The window closes after a fixed number of frames rather than a fixed
//! time, so a slow pipeline reports less often.

use crate::constants::metrics::{NANOS_PER_SEC, REPORT_WINDOW_FRAMES};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Source of monotonic nanosecond timestamps
pub trait MonotonicClock: Send + Sync {
    fn now_nanos(&self) -> u64;
}

/// [`Instant`]-backed clock, counting from its creation
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock for SystemClock {
    fn now_nanos(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}

/// Hand-driven clock for deterministic timing
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, nanos: u64) {
        self.nanos.store(nanos, Ordering::SeqCst);
    }

    pub fn advance(&self, nanos: u64) {
        self.nanos.fetch_add(nanos, Ordering::SeqCst);
    }
}

impl MonotonicClock for ManualClock {
    fn now_nanos(&self) -> u64 {
        self.nanos.load(Ordering::SeqCst)
    }
}

/// One frames-per-second measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FpsSample {
    pub value: u32,
}

impl std::fmt::Display for FpsSample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FPS: {}", self.value)
    }
}

/// Frame counter for the current reporting window
#[derive(Debug, Clone)]
pub struct FrameClock {
    frame_count: u32,
    window_start: u64,
    window_frames: u32,
}

impl FrameClock {
    /// Start a window at `now` closing after `window_frames` frames
    pub fn new(window_frames: u32, now: u64) -> Self {
        Self {
            frame_count: 0,
            window_start: now,
            window_frames: window_frames.max(1),
        }
    }

    /// Clock with the default 30 frame window
    pub fn with_default_window(now: u64) -> Self {
        Self::new(REPORT_WINDOW_FRAMES, now)
    }

    /// Open a fresh window at `now`
    pub fn reset(&mut self, now: u64) {
        self.frame_count = 0;
        self.window_start = now;
    }

    /// Count one frame; returns a sample when this frame closes the window
    pub fn tick(&mut self, now: u64) -> Option<FpsSample> {
        self.frame_count += 1;
        if self.frame_count < self.window_frames {
            return None;
        }

        let sample = FpsSample {
            value: fps(self.frame_count, now.saturating_sub(self.window_start)),
        };
        self.reset(now);
        Some(sample)
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn window_start(&self) -> u64 {
        self.window_start
    }

    pub fn window_frames(&self) -> u32 {
        self.window_frames
    }
}

/// Rounded frames per second; a zero-length window saturates
fn fps(frames: u32, elapsed_nanos: u64) -> u32 {
    let value = (f64::from(frames) * NANOS_PER_SEC / elapsed_nanos as f64).round();
    // `as` saturates: +inf becomes u32::MAX
    value as u32
}
