//! Classifier module - rule-based hand gesture classification
//!
//! Features are computed from smoothed landmarks, matched against ordered
//! rules, then debounced by the stabilizer.

mod features;
mod gesture;
mod rules;
mod stabilizer;

pub use features::{extract_features, FeatureSet, Finger};
pub use gesture::{Classification, GestureLabel, UnknownGesture};
pub use rules::{classify, GestureRule, RULES};
pub use stabilizer::{GestureStabilizer, StabilizerState};
