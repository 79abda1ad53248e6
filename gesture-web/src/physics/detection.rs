//! Velocity-based swipe detection
//!
//! Fires when horizontal wrist velocity crosses a threshold, then stays
//! silent until a cooldown deadline has passed.

use serde::{Deserialize, Serialize};

use super::velocity::VelocityTracker;

/// Detected swipe direction (image x axis)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwipeDirection::Left => "left",
            SwipeDirection::Right => "right",
        }
    }

    fn from_velocity(velocity: f32) -> Self {
        if velocity > 0.0 {
            SwipeDirection::Right
        } else {
            SwipeDirection::Left
        }
    }
}

/// Swipe detector with refractory cooldown
pub struct SwipeDetector {
    /// Recent wrist-x samples
    tracker: VelocityTracker,
    /// Minimum |velocity| to trigger detection
    velocity_threshold: f32,
    /// Refractory interval in seconds
    cooldown: f64,
    /// No swipe fires until strictly after this time
    cooldown_until: f64,
}

impl SwipeDetector {
    pub fn new(window: usize, velocity_threshold: f32, cooldown_secs: f64) -> Self {
        Self {
            tracker: VelocityTracker::with_capacity(window),
            velocity_threshold,
            cooldown: cooldown_secs,
            cooldown_until: f64::NEG_INFINITY,
        }
    }

    /// Feed one wrist-x sample taken at `t` seconds
    ///
    /// Returns the swipe direction when one fires. A fired swipe clears the
    /// velocity window and arms the cooldown.
    pub fn update(&mut self, wrist_x: f32, t: f64) -> Option<SwipeDirection> {
        self.tracker.push(wrist_x, t);
        let velocity = self.tracker.velocity();

        // Cooldown prevents spam
        if t <= self.cooldown_until {
            return None;
        }
        if velocity.abs() <= self.velocity_threshold {
            return None;
        }

        self.tracker.clear();
        self.cooldown_until = t + self.cooldown;
        Some(SwipeDirection::from_velocity(velocity))
    }

    /// Current windowed velocity, for diagnostics
    pub fn velocity(&self) -> f32 {
        self.tracker.velocity()
    }

    /// Drop the velocity window; the cooldown deadline is kept
    pub fn clear(&mut self) {
        self.tracker.clear();
    }

    pub fn window_len(&self) -> usize {
        self.tracker.len()
    }

    pub fn cooldown_until(&self) -> f64 {
        self.cooldown_until
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> SwipeDetector {
        SwipeDetector::new(5, 0.6, 0.6)
    }

    #[test]
    fn test_slow_motion_is_ignored() {
        let mut d = detector();
        for i in 0..10 {
            let t = i as f64 / 30.0;
            assert_eq!(d.update(0.5 + 0.01 * i as f32, t), None);
        }
    }

    #[test]
    fn test_fast_right_swipe() {
        let mut d = detector();
        assert_eq!(d.update(0.3, 0.0), None);
        assert_eq!(d.update(0.4, 0.05), Some(SwipeDirection::Right));
        assert_eq!(d.window_len(), 0);
    }

    #[test]
    fn test_fast_left_swipe() {
        let mut d = detector();
        d.update(0.7, 0.0);
        assert_eq!(d.update(0.6, 0.05), Some(SwipeDirection::Left));
    }

    #[test]
    fn test_cooldown_suppresses_second_swipe() {
        let mut d = detector();
        d.update(0.3, 0.0);
        assert_eq!(d.update(0.4, 0.05), Some(SwipeDirection::Right));

        // Second fast movement 300ms later: suppressed
        d.update(0.3, 0.30);
        assert_eq!(d.update(0.4, 0.35), None);

        // After the deadline a fresh movement fires again
        d.clear();
        d.update(0.3, 0.70);
        assert_eq!(d.update(0.4, 0.75), Some(SwipeDirection::Right));
    }
}
