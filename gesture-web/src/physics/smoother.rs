//! Per-landmark Kalman smoothing
//!
//! Three independent scalar filters per landmark. Depth gets its own, noisier
//! measurement model since the landmark model is least sure about z.

use crate::config::FilterNoise;
use crate::landmarks::{Frame, LandmarkPoint, LANDMARK_COUNT};

use super::kalman::KalmanFilter;

/// x, y, z filters for one landmark
#[derive(Clone, Debug)]
struct AxisFilters {
    x: KalmanFilter,
    y: KalmanFilter,
    z: KalmanFilter,
}

impl AxisFilters {
    fn new(xy_noise: FilterNoise, z_noise: FilterNoise) -> Self {
        Self {
            x: KalmanFilter::seeded(xy_noise),
            y: KalmanFilter::seeded(xy_noise),
            z: KalmanFilter::seeded(z_noise),
        }
    }

    fn filter(&mut self, point: LandmarkPoint) -> LandmarkPoint {
        LandmarkPoint {
            x: self.x.filter(point.x),
            y: self.y.filter(point.y),
            z: self.z.filter(point.z),
        }
    }
}

/// 21 x 3 filter states, one per coordinate per landmark
#[derive(Clone, Debug)]
pub struct FilterBank {
    filters: Vec<AxisFilters>,
}

impl FilterBank {
    fn new(xy_noise: FilterNoise, z_noise: FilterNoise) -> Self {
        Self {
            filters: (0..LANDMARK_COUNT)
                .map(|_| AxisFilters::new(xy_noise, z_noise))
                .collect(),
        }
    }

    /// Number of landmarks tracked
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// (x, y, z) estimates of one landmark
    pub fn estimate(&self, index: usize) -> Option<LandmarkPoint> {
        self.filters.get(index).map(|f| LandmarkPoint {
            x: f.x.estimate(),
            y: f.y.estimate(),
            z: f.z.estimate(),
        })
    }
}

/// Lazily-created filter bank over whole frames
pub struct LandmarkSmoother {
    xy_noise: FilterNoise,
    z_noise: FilterNoise,
    bank: Option<FilterBank>,
}

impl LandmarkSmoother {
    pub fn new(xy_noise: FilterNoise, z_noise: FilterNoise) -> Self {
        Self {
            xy_noise,
            z_noise,
            bank: None,
        }
    }

    /// Smooth one frame, returning a new frame of the same length
    ///
    /// The first frame after a reset seeds every filter with its raw value.
    pub fn smooth(&mut self, frame: &Frame) -> Frame {
        let (xy_noise, z_noise) = (self.xy_noise, self.z_noise);
        let bank = self
            .bank
            .get_or_insert_with(|| FilterBank::new(xy_noise, z_noise));

        let mut smoothed = *frame.landmarks();
        for (point, filters) in smoothed.iter_mut().zip(bank.filters.iter_mut()) {
            *point = filters.filter(*point);
        }

        let out = Frame::new(smoothed);
        match frame.handedness() {
            Some(handedness) => out.with_handedness(handedness),
            None => out,
        }
    }

    /// Drop all filter state; the next frame starts fresh
    pub fn reset(&mut self) {
        self.bank = None;
    }

    pub fn bank(&self) -> Option<&FilterBank> {
        self.bank.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{INDEX_TIP, WRIST};

    fn smoother() -> LandmarkSmoother {
        LandmarkSmoother::new(FilterNoise::new(0.001, 0.05), FilterNoise::new(0.001, 0.1))
    }

    fn uniform_frame(value: f32) -> Frame {
        Frame::new([LandmarkPoint::new(value, value, value); LANDMARK_COUNT])
    }

    #[test]
    fn test_bank_created_lazily() {
        let mut s = smoother();
        assert!(s.bank().is_none());
        s.smooth(&uniform_frame(0.5));
        assert_eq!(s.bank().map(FilterBank::len), Some(LANDMARK_COUNT));
    }

    #[test]
    fn test_first_frame_passes_through() {
        let mut s = smoother();
        let out = s.smooth(&uniform_frame(0.3));
        assert_eq!(out, uniform_frame(0.3));
    }

    #[test]
    fn test_jitter_is_damped() {
        let mut s = smoother();
        for _ in 0..30 {
            s.smooth(&uniform_frame(0.5));
        }
        let out = s.smooth(&uniform_frame(0.6));
        let moved = out.point(INDEX_TIP).x - 0.5;
        assert!(moved > 0.0 && moved < 0.05);
    }

    #[test]
    fn test_depth_trusted_less_than_plane() {
        let mut s = smoother();
        for _ in 0..30 {
            s.smooth(&uniform_frame(0.5));
        }
        let out = s.smooth(&uniform_frame(0.6));
        let wrist = out.point(WRIST);
        assert!(wrist.z < wrist.x);
    }

    #[test]
    fn test_reset_reseeds() {
        let mut s = smoother();
        for _ in 0..10 {
            s.smooth(&uniform_frame(0.2));
        }
        s.reset();
        assert!(s.bank().is_none());
        let out = s.smooth(&uniform_frame(0.9));
        assert_eq!(out.point(WRIST).y, 0.9);
    }
}
