//! Gesture labels
//!
//! `grab` is what the server-side recognizer calls an all-fingers-curled
//! hand; it is accepted on input and folded into `fist`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Gesture type enum for type-safe handling
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureLabel {
    #[default]
    None,
    Pinch,
    Point,
    Open,
    #[serde(alias = "grab")]
    Fist,
}

impl GestureLabel {
    /// All labels, in classification priority order with `None` last
    pub const ALL: [GestureLabel; 5] = [
        GestureLabel::Pinch,
        GestureLabel::Point,
        GestureLabel::Open,
        GestureLabel::Fist,
        GestureLabel::None,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GestureLabel::None => "none",
            GestureLabel::Pinch => "pinch",
            GestureLabel::Point => "point",
            GestureLabel::Open => "open",
            GestureLabel::Fist => "fist",
        }
    }

    pub fn is_none(&self) -> bool {
        *self == GestureLabel::None
    }
}

impl fmt::Display for GestureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized gesture name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownGesture(pub String);

impl fmt::Display for UnknownGesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown gesture '{}'", self.0)
    }
}

impl std::error::Error for UnknownGesture {}

impl FromStr for GestureLabel {
    type Err = UnknownGesture;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(GestureLabel::None),
            "pinch" => Ok(GestureLabel::Pinch),
            "point" => Ok(GestureLabel::Point),
            "open" => Ok(GestureLabel::Open),
            "fist" | "grab" => Ok(GestureLabel::Fist),
            _ => Err(UnknownGesture(s.to_string())),
        }
    }
}

/// A label with its confidence in [0, 1]
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: GestureLabel,
    pub confidence: f32,
}

impl Classification {
    pub const NONE: Classification = Classification {
        label: GestureLabel::None,
        confidence: 0.0,
    };

    pub fn new(label: GestureLabel, confidence: f32) -> Self {
        Self {
            label,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}
