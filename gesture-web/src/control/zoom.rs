//! Pinch-to-zoom
//!
//! Fingers moving apart (pinch distance growing) zoom in, fingers moving
//! together zoom out.

use crate::config::{FilterNoise, GestureConfig};
use crate::physics::KalmanFilter;

/// Turns successive pinch distances into smoothed zoom deltas
pub struct ZoomMapper {
    /// Normalized pinch of the previous pinch frame, 0 when not pinching
    last_pinch: f32,
    filter: KalmanFilter,
    sensitivity: f32,
    epsilon: f32,
}

impl ZoomMapper {
    pub fn new(config: &GestureConfig) -> Self {
        Self::with_params(config.zoom_noise, config.zoom_sensitivity, config.zoom_epsilon)
    }

    pub fn with_params(noise: FilterNoise, sensitivity: f32, epsilon: f32) -> Self {
        Self {
            last_pinch: 0.0,
            filter: KalmanFilter::new(noise),
            sensitivity,
            epsilon,
        }
    }

    /// Feed the normalized pinch of a frame whose stable gesture is pinch
    ///
    /// Returns a zoom delta when the smoothed change is above noise level.
    /// The first pinch frame only records a baseline.
    pub fn update(&mut self, normalized_pinch: f32) -> Option<f32> {
        let previous = std::mem::replace(&mut self.last_pinch, normalized_pinch);
        if previous <= 0.0 {
            return None;
        }

        let delta = (normalized_pinch - previous) * self.sensitivity;
        let smoothed = self.filter.filter(delta);
        (smoothed.abs() > self.epsilon).then_some(smoothed)
    }

    /// Gesture is not pinch: drop the baseline and zero the filter
    pub fn release(&mut self) {
        self.last_pinch = 0.0;
        self.filter.reset(0.0);
    }

    pub fn last_pinch(&self) -> f32 {
        self.last_pinch
    }
}

/// Absolute zoom level driven by zoom deltas, clamped to a range
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomLevel {
    level: f32,
    min: f32,
    max: f32,
}

impl ZoomLevel {
    pub const INITIAL: f32 = 1.0;

    pub fn new(range: (f32, f32)) -> Self {
        Self {
            level: Self::INITIAL.clamp(range.0, range.1),
            min: range.0,
            max: range.1,
        }
    }

    /// Apply a delta and return the clamped level
    pub fn apply(&mut self, delta: f32) -> f32 {
        self.level = (self.level + delta).clamp(self.min, self.max);
        self.level
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn reset(&mut self) {
        self.level = Self::INITIAL.clamp(self.min, self.max);
    }
}

impl Default for ZoomLevel {
    fn default() -> Self {
        Self::new(GestureConfig::default().zoom_range)
    }
}
