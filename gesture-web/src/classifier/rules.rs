//! Ordered gesture rules
//!
//! Several rules can hold at once (a pinching hand also has curled middle and
//! ring fingers), so rules are tried top to bottom and the first match wins.

use crate::config::GestureConfig;

use super::features::{FeatureSet, Finger};
use super::gesture::{Classification, GestureLabel};

/// Span of normalized pinch over which pinch confidence ramps 0 -> 1
const PINCH_CONFIDENCE_SPAN: f32 = 0.3;

const POINT_CONFIDENCE: f32 = 0.9;
const OPEN_CONFIDENCE: f32 = 0.85;
const FIST_CONFIDENCE: f32 = 0.8;

/// Open hand needs at least this many of index..pinky extended
const OPEN_MIN_FINGERS: usize = 3;

/// One predicate -> label entry; the predicate returns a confidence on match
pub struct GestureRule {
    pub label: GestureLabel,
    pub matches: fn(&FeatureSet, &GestureConfig) -> Option<f32>,
}

/// Priority order: pinch, point, open, fist
pub const RULES: [GestureRule; 4] = [
    GestureRule {
        label: GestureLabel::Pinch,
        matches: pinch,
    },
    GestureRule {
        label: GestureLabel::Point,
        matches: point,
    },
    GestureRule {
        label: GestureLabel::Open,
        matches: open,
    },
    GestureRule {
        label: GestureLabel::Fist,
        matches: fist,
    },
];

/// Thumb and index tips close, middle and ring curled
pub fn pinch(features: &FeatureSet, config: &GestureConfig) -> Option<f32> {
    let curled = !features.is_extended(Finger::Middle) && !features.is_extended(Finger::Ring);
    if features.normalized_pinch < config.pinch_threshold && curled {
        Some(((config.pinch_threshold - features.normalized_pinch) / PINCH_CONFIDENCE_SPAN).clamp(0.0, 1.0))
    } else {
        None
    }
}

/// Only the index finger extended
pub fn point(features: &FeatureSet, _config: &GestureConfig) -> Option<f32> {
    let only_index = features.is_extended(Finger::Index)
        && !features.is_extended(Finger::Middle)
        && !features.is_extended(Finger::Ring)
        && !features.is_extended(Finger::Pinky);
    only_index.then_some(POINT_CONFIDENCE)
}

/// Most fingers and the thumb extended
pub fn open(features: &FeatureSet, _config: &GestureConfig) -> Option<f32> {
    (features.extended_count() >= OPEN_MIN_FINGERS && features.thumb_extended).then_some(OPEN_CONFIDENCE)
}

/// Nothing extended
pub fn fist(features: &FeatureSet, _config: &GestureConfig) -> Option<f32> {
    (features.extended_count() == 0 && !features.thumb_extended).then_some(FIST_CONFIDENCE)
}

/// Classify one frame's features; unavailable features are `none`
pub fn classify(features: Option<&FeatureSet>, config: &GestureConfig) -> Classification {
    let Some(features) = features else {
        return Classification::NONE;
    };

    RULES
        .iter()
        .find_map(|rule| (rule.matches)(features, config).map(|c| Classification::new(rule.label, c)))
        .unwrap_or(Classification::NONE)
}
