//! Geometric feature extraction for gesture classification
//!
//! All distance features are divided by palm size so the rules do not depend
//! on how far the hand is from the camera.

use nalgebra::distance;

use crate::config::GestureConfig;
use crate::landmarks::{Frame, FINGER_JOINTS, INDEX_TIP, MIDDLE_MCP, THUMB_TIP, WRIST};
use crate::physics::calculate_curl_angle;

/// Palm sizes below this are treated as a collapsed hand
const MIN_PALM_SIZE: f32 = 1e-6;

/// Finger order used by the per-finger arrays
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Finger {
    Index = 0,
    Middle = 1,
    Ring = 2,
    Pinky = 3,
}

/// Features extracted from one smoothed frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeatureSet {
    /// Wrist to middle-finger base distance (image plane)
    pub palm_size: f32,
    /// Thumb tip to index tip 3D distance, in palm sizes
    pub normalized_pinch: f32,
    /// Curl angle (radians) at the PIP joint, index..pinky
    pub curl_angles: [f32; 4],
    /// Curl angle above threshold, index..pinky
    pub extended: [bool; 4],
    /// Thumb tip far enough from the wrist
    pub thumb_extended: bool,
}

impl FeatureSet {
    pub fn is_extended(&self, finger: Finger) -> bool {
        self.extended[finger as usize]
    }

    /// Number of extended fingers, thumb excluded
    pub fn extended_count(&self) -> usize {
        self.extended.iter().filter(|&&e| e).count()
    }
}

/// Extract features from a smoothed frame
///
/// Returns `None` when palm size is zero or NaN (coincident wrist and
/// middle-finger base), in which case nothing can be normalized.
pub fn extract_features(frame: &Frame, config: &GestureConfig) -> Option<FeatureSet> {
    let wrist = frame.point(WRIST);
    let palm_size = distance(&wrist.planar(), &frame.point(MIDDLE_MCP).planar());
    if !palm_size.is_finite() || palm_size < MIN_PALM_SIZE {
        return None;
    }

    let mut curl_angles = [0.0; 4];
    let mut extended = [false; 4];
    for (i, &(base, joint, tip)) in FINGER_JOINTS.iter().enumerate() {
        let angle = calculate_curl_angle(
            frame.point(base).planar(),
            frame.point(joint).planar(),
            frame.point(tip).planar(),
        );
        curl_angles[i] = angle;
        // NaN compares false, so a broken angle never counts as extended
        extended[i] = angle > config.curl_threshold;
    }

    let thumb_tip = frame.point(THUMB_TIP);
    let thumb_reach = distance(&thumb_tip.planar(), &wrist.planar());
    let thumb_extended = thumb_reach > palm_size * config.thumb_extension_ratio;

    let pinch = distance(&thumb_tip.spatial(), &frame.point(INDEX_TIP).spatial());

    Some(FeatureSet {
        palm_size,
        normalized_pinch: pinch / palm_size,
        curl_angles,
        extended,
        thumb_extended,
    })
}
