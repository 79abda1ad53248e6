//! Pipeline configuration
//!
//! Every tunable has a default taken from the shipped hand tracker, so a
//! partial JS object or JSON document is enough. Field names are camelCase on
//! the wire.

use serde::{Deserialize, Serialize};

use crate::error::{GestureError, GestureResult};

/// Process / measurement noise pair for one scalar Kalman filter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterNoise {
    /// Q - how fast the true value is allowed to drift per frame
    pub process: f32,
    /// R - how noisy each measurement is
    pub measurement: f32,
}

impl FilterNoise {
    pub const fn new(process: f32, measurement: f32) -> Self {
        Self { process, measurement }
    }

    fn validate(&self, name: &str) -> GestureResult<()> {
        if !(self.process.is_finite() && self.process > 0.0) {
            return Err(GestureError::InvalidConfig(format!(
                "{name}.process must be positive, got {}",
                self.process
            )));
        }
        if !(self.measurement.is_finite() && self.measurement > 0.0) {
            return Err(GestureError::InvalidConfig(format!(
                "{name}.measurement must be positive, got {}",
                self.measurement
            )));
        }
        Ok(())
    }
}

/// All recognized tunables of the gesture pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GestureConfig {
    /// Consecutive agreeing frames before a new gesture is confirmed
    pub stabilizer_entry_frames: u32,
    /// Candidate switches before a held gesture may drop straight to none
    pub stabilizer_exit_frames: u32,
    /// Normalized thumb-index distance below which the hand pinches
    pub pinch_threshold: f32,
    /// Curl angle (radians) above which a finger counts as extended
    pub curl_threshold: f32,
    /// Thumb tip to wrist distance, in palm sizes, for an extended thumb
    pub thumb_extension_ratio: f32,
    /// Wrist-x velocity (normalized units per second) that fires a swipe
    pub swipe_velocity_threshold: f32,
    /// Refractory interval after a swipe
    pub swipe_cooldown_ms: f64,
    /// Number of wrist samples in the swipe velocity window
    pub swipe_window: usize,
    /// Multiplier from pinch change to zoom delta
    pub zoom_sensitivity: f32,
    /// Smoothed zoom deltas at or below this magnitude are dropped
    pub zoom_epsilon: f32,
    /// Absolute zoom clamp used by [`crate::control::ZoomLevel`]
    pub zoom_range: (f32, f32),
    /// Landmark x/y filters
    pub landmark_xy_noise: FilterNoise,
    /// Landmark depth filter (less trusted than x/y)
    pub landmark_z_noise: FilterNoise,
    /// Raw thumb-index distance filter, ahead of pinch classification and zoom
    pub pinch_noise: FilterNoise,
    /// Zoom delta filter
    pub zoom_noise: FilterNoise,
    /// Hand position filters used for rotation
    pub position_noise: FilterNoise,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            stabilizer_entry_frames: 4,
            stabilizer_exit_frames: 3,
            pinch_threshold: 0.45,
            curl_threshold: 2.3,
            thumb_extension_ratio: 0.85,
            swipe_velocity_threshold: 0.6,
            swipe_cooldown_ms: 600.0,
            swipe_window: 5,
            zoom_sensitivity: 15.0,
            zoom_epsilon: 0.002,
            zoom_range: (0.5, 3.0),
            landmark_xy_noise: FilterNoise::new(0.001, 0.05),
            landmark_z_noise: FilterNoise::new(0.001, 0.1),
            pinch_noise: FilterNoise::new(0.005, 0.02),
            zoom_noise: FilterNoise::new(0.001, 0.01),
            position_noise: FilterNoise::new(0.002, 0.03),
        }
    }
}

impl GestureConfig {
    /// Parse a (possibly partial) JSON document, then validate it
    pub fn from_json(json: &str) -> GestureResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| GestureError::InvalidConfig(format!("malformed config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_stabilizer_frames(mut self, entry: u32, exit: u32) -> Self {
        self.stabilizer_entry_frames = entry;
        self.stabilizer_exit_frames = exit;
        self
    }

    pub fn with_pinch_threshold(mut self, threshold: f32) -> Self {
        self.pinch_threshold = threshold;
        self
    }

    pub fn with_swipe(mut self, velocity_threshold: f32, cooldown_ms: f64) -> Self {
        self.swipe_velocity_threshold = velocity_threshold;
        self.swipe_cooldown_ms = cooldown_ms;
        self
    }

    pub fn with_zoom_sensitivity(mut self, sensitivity: f32) -> Self {
        self.zoom_sensitivity = sensitivity;
        self
    }

    /// Swipe cooldown in seconds, the unit timestamps are given in
    pub fn swipe_cooldown_secs(&self) -> f64 {
        self.swipe_cooldown_ms / 1000.0
    }

    /// Reject values that would make the pipeline misbehave
    pub fn validate(&self) -> GestureResult<()> {
        if self.stabilizer_entry_frames == 0 {
            return Err(GestureError::InvalidConfig(
                "stabilizerEntryFrames must be at least 1".into(),
            ));
        }
        if self.stabilizer_exit_frames == 0 {
            return Err(GestureError::InvalidConfig(
                "stabilizerExitFrames must be at least 1".into(),
            ));
        }
        positive("pinchThreshold", self.pinch_threshold)?;
        positive("thumbExtensionRatio", self.thumb_extension_ratio)?;
        positive("swipeVelocityThreshold", self.swipe_velocity_threshold)?;
        positive("zoomSensitivity", self.zoom_sensitivity)?;

        if !(self.curl_threshold.is_finite()
            && self.curl_threshold > 0.0
            && self.curl_threshold < std::f32::consts::PI)
        {
            return Err(GestureError::InvalidConfig(format!(
                "curlThreshold must be in (0, PI) radians, got {}",
                self.curl_threshold
            )));
        }
        if !(self.swipe_cooldown_ms.is_finite() && self.swipe_cooldown_ms >= 0.0) {
            return Err(GestureError::InvalidConfig(format!(
                "swipeCooldownMs must be non-negative, got {}",
                self.swipe_cooldown_ms
            )));
        }
        if self.swipe_window < 2 {
            return Err(GestureError::InvalidConfig(
                "swipeWindow needs at least 2 samples to measure velocity".into(),
            ));
        }
        if !(self.zoom_epsilon.is_finite() && self.zoom_epsilon >= 0.0) {
            return Err(GestureError::InvalidConfig(format!(
                "zoomEpsilon must be non-negative, got {}",
                self.zoom_epsilon
            )));
        }

        let (min_zoom, max_zoom) = self.zoom_range;
        if !(min_zoom.is_finite() && max_zoom.is_finite() && min_zoom > 0.0 && min_zoom < max_zoom) {
            return Err(GestureError::InvalidConfig(format!(
                "zoomRange must satisfy 0 < min < max, got ({min_zoom}, {max_zoom})"
            )));
        }

        self.landmark_xy_noise.validate("landmarkXyNoise")?;
        self.landmark_z_noise.validate("landmarkZNoise")?;
        self.pinch_noise.validate("pinchNoise")?;
        self.zoom_noise.validate("zoomNoise")?;
        self.position_noise.validate("positionNoise")?;
        Ok(())
    }
}

fn positive(name: &str, value: f32) -> GestureResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GestureError::InvalidConfig(format!(
            "{name} must be positive, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(GestureConfig::default().validate().is_ok());
    }

    #[test]
    fn test_negative_cooldown_rejected() {
        let config = GestureConfig::default().with_swipe(0.6, -1.0);
        assert!(matches!(config.validate(), Err(GestureError::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_entry_frames_rejected() {
        let config = GestureConfig::default().with_stabilizer_frames(0, 2);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_zoom_range_rejected() {
        let config = GestureConfig {
            zoom_range: (3.0, 0.5),
            ..GestureConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_noise_rejected() {
        let config = GestureConfig {
            landmark_z_noise: FilterNoise::new(0.001, 0.0),
            ..GestureConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = GestureConfig::from_json(
            r#"{ "stabilizerEntryFrames": 3, "swipeCooldownMs": 400 }"#,
        )
        .unwrap();
        assert_eq!(config.stabilizer_entry_frames, 3);
        assert_eq!(config.swipe_cooldown_ms, 400.0);
        assert_eq!(config.stabilizer_exit_frames, 3);
        assert_eq!(config.pinch_threshold, 0.45);
        assert_eq!(config.position_noise, FilterNoise::new(0.002, 0.03));
        assert_eq!(config.pinch_noise, FilterNoise::new(0.005, 0.02));
    }

    #[test]
    fn test_pinch_noise_from_json() {
        let config = GestureConfig::from_json(
            r#"{ "pinchNoise": { "process": 0.01, "measurement": 0.05 } }"#,
        )
        .unwrap();
        assert_eq!(config.pinch_noise, FilterNoise::new(0.01, 0.05));
        assert!(GestureConfig::from_json(r#"{ "pinchNoise": { "process": 0.0, "measurement": 0.05 } }"#).is_err());
    }

    #[test]
    fn test_json_validation_runs() {
        let result = GestureConfig::from_json(r#"{ "swipeCooldownMs": -600 }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let result = GestureConfig::from_json("{ not json");
        assert!(matches!(result, Err(GestureError::InvalidConfig(_))));
    }
}
