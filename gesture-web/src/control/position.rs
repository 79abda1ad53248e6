//! Smoothed hand position for rotation control

use crate::config::FilterNoise;
use crate::physics::KalmanFilter;

/// Neutral position the filters fall back to between gestures
pub const CENTER: (f32, f32) = (0.5, 0.5);

/// Pair of Kalman filters over wrist x/y
pub struct PositionMapper {
    x: KalmanFilter,
    y: KalmanFilter,
}

impl PositionMapper {
    pub fn new(noise: FilterNoise) -> Self {
        Self {
            x: KalmanFilter::starting_at(noise, CENTER.0),
            y: KalmanFilter::starting_at(noise, CENTER.1),
        }
    }

    pub fn update(&mut self, wrist: (f32, f32)) -> (f32, f32) {
        (self.x.filter(wrist.0), self.y.filter(wrist.1))
    }

    /// Recenter so the next gesture does not snap from a stale position
    pub fn recenter(&mut self) {
        self.x.reset(CENTER.0);
        self.y.reset(CENTER.1);
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x.estimate(), self.y.estimate())
    }
}
