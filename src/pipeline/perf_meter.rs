// SPDX-License-Identifier: GPL-3.0-only

//! Time-interval throughput meter
//!
//! Complements the frame-count window of [`super::FrameClock`]: the meter
//! closes an interval once a fixed amount of time has passed, then logs the
//! rate on the following hit. Useful for stages that are not paced by the
//! render surface, like the native processing routine.

use super::frame_clock::MonotonicClock;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IntervalState {
    NotSet,
    Running,
    Ended,
}

/// Named rate meter
pub struct PerfMeter {
    name: String,
    clock: Arc<dyn MonotonicClock>,
    interval_nanos: u64,
    state: IntervalState,
    count: u64,
    start: u64,
    end: u64,
}

impl PerfMeter {
    pub fn new(name: &str, interval: Duration, clock: Arc<dyn MonotonicClock>) -> Self {
        Self {
            name: name.to_string(),
            clock,
            interval_nanos: u64::try_from(interval.as_nanos()).unwrap_or(u64::MAX).max(1),
            state: IntervalState::NotSet,
            count: 0,
            start: 0,
            end: 0,
        }
    }

    /// Record one event; returns the rate when a finished interval is logged
    pub fn hit(&mut self) -> Option<f64> {
        let mut logged = None;
        if self.state == IntervalState::Ended {
            let rate = self.rate();
            info!(name = %self.name, rate, "Perf meter");
            logged = Some(rate);
            // Next interval starts where the last one ended
            self.state = IntervalState::Running;
            self.count = 0;
            self.start = self.end;
        }

        let now = self.clock.now_nanos();
        match self.state {
            IntervalState::NotSet => {
                self.start = now;
                self.end = now;
                self.state = IntervalState::Running;
            }
            IntervalState::Running => {
                self.count += 1;
                self.end = now;
                if self.end.saturating_sub(self.start) > self.interval_nanos {
                    self.state = IntervalState::Ended;
                }
            }
            IntervalState::Ended => {}
        }
        logged
    }

    /// Events per second over the current interval
    pub fn rate(&self) -> f64 {
        let elapsed = self.end.saturating_sub(self.start);
        if elapsed == 0 {
            return 0.0;
        }
        self.count as f64 * 1e9 / elapsed as f64
    }

    /// Forget the current interval
    pub fn clear(&mut self) {
        self.state = IntervalState::NotSet;
        self.count = 0;
    }
}

impl std::fmt::Debug for PerfMeter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PerfMeter")
            .field("name", &self.name)
            .field("state", &self.state)
            .field("count", &self.count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::ManualClock;

    const MS: u64 = 1_000_000;

    #[test]
    fn test_logs_after_interval_elapses() {
        let clock = ManualClock::new();
        let mut meter = PerfMeter::new("test", Duration::from_millis(100), Arc::new(clock.clone()));

        // Opening hit plus one hit every 10ms
        assert_eq!(meter.hit(), None);
        for _ in 0..11 {
            clock.advance(10 * MS);
            assert_eq!(meter.hit(), None);
        }

        // 11 events over 110ms
        clock.advance(10 * MS);
        let rate = meter.hit().unwrap();
        assert!((rate - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_next_interval_starts_at_previous_end() {
        let clock = ManualClock::new();
        let mut meter = PerfMeter::new("test", Duration::from_millis(10), Arc::new(clock.clone()));

        meter.hit();
        clock.advance(20 * MS);
        meter.hit(); // closes the first interval at t=20ms

        clock.advance(5 * MS);
        assert!(meter.hit().is_some());
        // One event in the 5ms since the previous end
        assert!((meter.rate() - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_clear_restarts() {
        let clock = ManualClock::new();
        let mut meter = PerfMeter::new("test", Duration::from_millis(10), Arc::new(clock.clone()));
        meter.hit();
        clock.advance(MS);
        meter.hit();
        meter.clear();
        assert_eq!(meter.rate(), 0.0);

        // First hit after clear only opens the interval
        meter.hit();
        clock.advance(2 * MS);
        meter.hit();
        assert!((meter.rate() - 500.0).abs() < 1e-9);
    }
}
