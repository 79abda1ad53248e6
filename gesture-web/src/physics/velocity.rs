//! Timestamped velocity tracking
//!
//! Keeps a short window of (value, time) samples and reports the average
//! rate of change from the oldest to the newest sample.

use std::collections::VecDeque;

/// Default number of samples kept
pub const VELOCITY_SAMPLES: usize = 5;

/// Windows shorter than this (seconds) report zero velocity
pub const MIN_ELAPSED_SECS: f64 = 0.01;

/// Velocity tracker with a bounded sample history
pub struct VelocityTracker {
    /// Ring buffer of recent (value, timestamp seconds)
    history: VecDeque<(f32, f64)>,
    capacity: usize,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::with_capacity(VELOCITY_SAMPLES)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(2);
        Self {
            history: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Record a sample taken at `t` seconds
    pub fn push(&mut self, value: f32, t: f64) {
        self.history.push_back((value, t));
        while self.history.len() > self.capacity {
            self.history.pop_front();
        }
    }

    /// Units per second from oldest to newest sample
    ///
    /// Zero with fewer than two samples or when they span under 10ms.
    pub fn velocity(&self) -> f32 {
        let (Some(&(first, t0)), Some(&(last, t1))) = (self.history.front(), self.history.back())
        else {
            return 0.0;
        };
        if self.history.len() < 2 {
            return 0.0;
        }

        let elapsed = t1 - t0;
        if elapsed < MIN_ELAPSED_SECS {
            return 0.0;
        }
        ((last - first) as f64 / elapsed) as f32
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Clear history
    pub fn clear(&mut self) {
        self.history.clear();
    }
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new()
    }
}
