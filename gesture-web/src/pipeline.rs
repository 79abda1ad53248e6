//! Gesture pipeline
//!
//! Owns every piece of per-hand state and runs one frame at a time:
//! smoothing -> features -> raw gesture -> stable gesture -> control events.

use log::info;
use serde::{Deserialize, Serialize};

use crate::classifier::{
    classify, extract_features, Classification, FeatureSet, GestureLabel, GestureStabilizer,
};
use crate::config::GestureConfig;
use crate::control::{ControlEvent, ControlMapper};
use crate::error::GestureResult;
use crate::landmarks::{Frame, Handedness};
use crate::physics::{FilterBank, KalmanFilter, LandmarkSmoother};

/// Everything produced for one input frame
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameOutput {
    /// Stabilized gesture
    pub gesture: GestureLabel,
    /// Confidence of the stabilized gesture
    pub confidence: f32,
    /// Per-frame rule result before debouncing
    pub raw_gesture: GestureLabel,
    pub raw_confidence: f32,
    pub handedness: Option<Handedness>,
    pub events: Vec<ControlEvent>,
}

impl FrameOutput {
    /// No hand visible
    pub fn idle() -> Self {
        Self {
            gesture: GestureLabel::None,
            confidence: 0.0,
            raw_gesture: GestureLabel::None,
            raw_confidence: 0.0,
            handedness: None,
            events: Vec::new(),
        }
    }
}

/// Single-hand gesture pipeline
///
/// Not internally synchronized: one frame source per instance.
pub struct GesturePipeline {
    config: GestureConfig,
    smoother: LandmarkSmoother,
    /// Raw thumb-index distance, filtered before it is normalized
    pinch_filter: KalmanFilter,
    stabilizer: GestureStabilizer,
    controls: ControlMapper,
    /// Last raw confidence seen while the raw label matched the stable one
    stable_confidence: f32,
    /// Whether the previous call saw a hand
    tracking: bool,
}

impl GesturePipeline {
    /// Build a pipeline, rejecting out-of-range configuration
    pub fn new(config: GestureConfig) -> GestureResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: GestureConfig) -> Self {
        Self {
            smoother: LandmarkSmoother::new(config.landmark_xy_noise, config.landmark_z_noise),
            pinch_filter: KalmanFilter::seeded(config.pinch_noise),
            stabilizer: GestureStabilizer::new(
                config.stabilizer_entry_frames,
                config.stabilizer_exit_frames,
            ),
            controls: ControlMapper::new(&config),
            stable_confidence: 0.0,
            tracking: false,
            config,
        }
    }

    /// Process one frame taken at `t` seconds; `None` means no hand visible
    pub fn process_frame(&mut self, frame: Option<&Frame>, t: f64) -> FrameOutput {
        let Some(frame) = frame else {
            self.reset();
            return FrameOutput::idle();
        };
        self.tracking = true;

        let smoothed = self.smoother.smooth(frame);
        let features =
            extract_features(&smoothed, &self.config).map(|features| self.filter_pinch(features));
        let raw = classify(features.as_ref(), &self.config);
        let gesture = self.stabilizer.update(raw.label);

        let events = match features {
            Some(ref features) => self.map_controls(gesture, features, &smoothed, t),
            None => Vec::new(),
        };

        FrameOutput {
            gesture,
            confidence: self.stable_confidence(gesture, raw),
            raw_gesture: raw.label,
            raw_confidence: raw.confidence,
            handedness: frame.handedness(),
            events,
        }
    }

    /// Process a flat `[x, y, z] * 21` buffer; any other length is no hand
    pub fn process_flat(
        &mut self,
        data: &[f32],
        handedness: Option<Handedness>,
        t: f64,
    ) -> FrameOutput {
        let frame = Frame::from_flat(data).ok().map(|frame| match handedness {
            Some(h) => frame.with_handedness(h),
            None => frame,
        });
        self.process_frame(frame.as_ref(), t)
    }

    /// Replace the normalized pinch with one built from the filtered distance
    fn filter_pinch(&mut self, mut features: FeatureSet) -> FeatureSet {
        let distance = self
            .pinch_filter
            .filter(features.normalized_pinch * features.palm_size);
        features.normalized_pinch = distance / features.palm_size;
        features
    }

    fn map_controls(
        &mut self,
        gesture: GestureLabel,
        features: &FeatureSet,
        smoothed: &Frame,
        t: f64,
    ) -> Vec<ControlEvent> {
        self.controls.update(gesture, features, smoothed.wrist(), t)
    }

    fn stable_confidence(&mut self, gesture: GestureLabel, raw: Classification) -> f32 {
        if gesture.is_none() {
            self.stable_confidence = 0.0;
        } else if raw.label == gesture {
            self.stable_confidence = raw.confidence;
        }
        self.stable_confidence
    }

    /// Tracking stopped: forget filters, gesture and control baselines
    pub fn reset(&mut self) {
        if self.tracking {
            info!("hand lost, resetting gesture tracking");
        }
        self.tracking = false;
        self.smoother.reset();
        self.pinch_filter = KalmanFilter::seeded(self.config.pinch_noise);
        self.stabilizer.reset();
        self.controls.reset();
        self.stable_confidence = 0.0;
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn current_gesture(&self) -> GestureLabel {
        self.stabilizer.current()
    }

    pub fn filter_bank(&self) -> Option<&FilterBank> {
        self.smoother.bank()
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }
}

impl Default for GesturePipeline {
    fn default() -> Self {
        Self::build(GestureConfig::default())
    }
}
