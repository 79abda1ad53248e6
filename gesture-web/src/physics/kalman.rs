//! Scalar Kalman filter
//!
//! Random-walk model with identity transition: each landmark coordinate,
//! zoom delta and hand position gets its own instance.

use crate::config::FilterNoise;

/// Initial error covariance after construction or reset
const INITIAL_COVARIANCE: f32 = 1.0;

/// One-dimensional Kalman filter
#[derive(Clone, Debug)]
pub struct KalmanFilter {
    /// Current estimate
    estimate: f32,

    /// Error covariance (uncertainty of the estimate)
    covariance: f32,

    /// Process noise - higher values = more responsive, lower = smoother
    process_noise: f32,

    /// Measurement noise - how much we distrust each sample
    measurement_noise: f32,

    /// When false, the next measurement becomes the estimate directly
    primed: bool,
}

impl KalmanFilter {
    /// Filter starting at 0 with unit covariance
    pub fn new(noise: FilterNoise) -> Self {
        Self::starting_at(noise, 0.0)
    }

    /// Filter starting at `value` with unit covariance
    pub fn starting_at(noise: FilterNoise, value: f32) -> Self {
        Self {
            estimate: value,
            covariance: INITIAL_COVARIANCE,
            process_noise: noise.process,
            measurement_noise: noise.measurement,
            primed: true,
        }
    }

    /// Filter whose first measurement seeds the estimate
    ///
    /// Avoids the start-up lag of crawling from 0 toward the first sample.
    pub fn seeded(noise: FilterNoise) -> Self {
        Self {
            primed: false,
            ..Self::new(noise)
        }
    }

    /// Predict + correct with one measurement, returns the new estimate
    ///
    /// ```text
    /// P' = P + Q
    /// K  = P' / (P' + R)
    /// x  = x + K (z - x)
    /// P  = (1 - K) P'
    /// ```
    ///
    /// A non-finite measurement leaves the state untouched: a primed filter
    /// returns its held estimate, an unprimed one passes the value through.
    pub fn filter(&mut self, measurement: f32) -> f32 {
        if !measurement.is_finite() {
            return if self.primed { self.estimate } else { measurement };
        }
        if !self.primed {
            self.estimate = measurement;
            self.primed = true;
        }

        let predicted = self.covariance + self.process_noise;
        let gain = predicted / (predicted + self.measurement_noise);

        self.estimate += gain * (measurement - self.estimate);
        self.covariance = (1.0 - gain) * predicted;

        self.estimate
    }

    /// Jump to `value` with unit covariance
    pub fn reset(&mut self, value: f32) {
        self.estimate = value;
        self.covariance = INITIAL_COVARIANCE;
        self.primed = true;
    }

    pub fn estimate(&self) -> f32 {
        self.estimate
    }

    pub fn covariance(&self) -> f32 {
        self.covariance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOISE: FilterNoise = FilterNoise::new(0.001, 0.05);

    #[test]
    fn test_first_update_gain() {
        let mut filter = KalmanFilter::new(NOISE);
        let out = filter.filter(1.0);
        // P' = 1.001, K = 1.001 / 1.051
        let gain = 1.001 / 1.051;
        assert!((out - gain).abs() < 1e-6);
        assert!((filter.covariance() - (1.0 - gain) * 1.001).abs() < 1e-6);
    }

    #[test]
    fn test_seeded_filter_starts_at_measurement() {
        let mut filter = KalmanFilter::seeded(NOISE);
        assert_eq!(filter.filter(0.42), 0.42);
        assert_eq!(filter.filter(0.42), 0.42);
    }

    #[test]
    fn test_error_shrinks_monotonically() {
        let mut filter = KalmanFilter::starting_at(NOISE, 0.0);
        let mut last_error = f32::MAX;
        for _ in 0..60 {
            let error = (filter.filter(0.8) - 0.8).abs();
            assert!(error < last_error);
            last_error = error;
        }
        assert!(last_error < 0.01);
    }

    #[test]
    fn test_non_finite_measurement_holds_estimate() {
        let mut filter = KalmanFilter::seeded(NOISE);
        filter.filter(0.4);
        let covariance = filter.covariance();

        assert_eq!(filter.filter(f32::NAN), 0.4);
        assert_eq!(filter.filter(f32::INFINITY), 0.4);
        assert_eq!(filter.covariance(), covariance);

        // the next good sample is filtered as usual
        let out = filter.filter(0.5);
        assert!(out.is_finite() && out > 0.4 && out < 0.5);
    }

    #[test]
    fn test_non_finite_first_measurement_does_not_seed() {
        let mut filter = KalmanFilter::seeded(NOISE);
        assert!(filter.filter(f32::NAN).is_nan());
        assert_eq!(filter.filter(0.3), 0.3);
    }

    #[test]
    fn test_reset_restores_covariance() {
        let mut filter = KalmanFilter::new(NOISE);
        for _ in 0..10 {
            filter.filter(0.3);
        }
        filter.reset(0.5);
        assert_eq!(filter.estimate(), 0.5);
        assert_eq!(filter.covariance(), 1.0);
    }
}
