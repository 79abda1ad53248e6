//! Hand landmark frames
//!
//! A frame is one MediaPipe hand: 21 normalized points in a fixed anatomical
//! order, plus an optional handedness label.

use std::str::FromStr;

use nalgebra::{Point2, Point3};
use serde::{Deserialize, Serialize};

use crate::error::{GestureError, GestureResult};

// ============================================================================
// HAND LANDMARK INDICES (MediaPipe Hands - 21 total)
// ============================================================================

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Landmarks per hand
pub const LANDMARK_COUNT: usize = 21;

/// Floats per hand in a flat `[x0, y0, z0, x1, ...]` buffer
pub const FLAT_LEN: usize = LANDMARK_COUNT * 3;

/// (base, middle, tip) joint triads used for curl angles, index..pinky
pub const FINGER_JOINTS: [(usize, usize, usize); 4] = [
    (INDEX_MCP, INDEX_PIP, INDEX_TIP),
    (MIDDLE_MCP, MIDDLE_PIP, MIDDLE_TIP),
    (RING_MCP, RING_PIP, RING_TIP),
    (PINKY_MCP, PINKY_PIP, PINKY_TIP),
];

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// A single 3D landmark point (normalized coordinates)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LandmarkPoint {
    pub x: f32, // 0-1 normalized
    pub y: f32, // 0-1 normalized
    pub z: f32, // Relative depth
}

impl LandmarkPoint {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Position in the image plane
    pub fn planar(&self) -> Point2<f32> {
        Point2::new(self.x, self.y)
    }

    pub fn spatial(&self) -> Point3<f32> {
        Point3::new(self.x, self.y, self.z)
    }
}

/// Which hand the landmark model believes it saw
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handedness {
    Left,
    Right,
    Unknown,
}

impl Handedness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Handedness::Left => "left",
            Handedness::Right => "right",
            Handedness::Unknown => "unknown",
        }
    }

    /// Parse a MediaPipe category name ("Left", "Right"); anything else is unknown
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or(Handedness::Unknown)
    }
}

impl FromStr for Handedness {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Handedness::Left),
            "right" => Ok(Handedness::Right),
            "unknown" => Ok(Handedness::Unknown),
            _ => Err(()),
        }
    }
}

/// One tracked hand: exactly 21 landmarks
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    landmarks: [LandmarkPoint; LANDMARK_COUNT],
    handedness: Option<Handedness>,
}

impl Frame {
    pub fn new(landmarks: [LandmarkPoint; LANDMARK_COUNT]) -> Self {
        Self {
            landmarks,
            handedness: None,
        }
    }

    pub fn with_handedness(mut self, handedness: Handedness) -> Self {
        self.handedness = Some(handedness);
        self
    }

    /// Build from a point list; anything but 21 points is not a hand
    pub fn from_points(points: &[LandmarkPoint]) -> GestureResult<Self> {
        let landmarks: [LandmarkPoint; LANDMARK_COUNT] =
            points.try_into().map_err(|_| GestureError::InvalidFrame {
                expected: LANDMARK_COUNT,
                actual: points.len(),
            })?;
        Ok(Self::new(landmarks))
    }

    /// Build from `[x0, y0, z0, x1, y1, z1, ...]` as sent by the JS side
    pub fn from_flat(data: &[f32]) -> GestureResult<Self> {
        if data.len() != FLAT_LEN {
            return Err(GestureError::InvalidFrame {
                expected: LANDMARK_COUNT,
                actual: data.len() / 3,
            });
        }

        let mut landmarks = [LandmarkPoint::default(); LANDMARK_COUNT];
        for (point, xyz) in landmarks.iter_mut().zip(data.chunks_exact(3)) {
            *point = LandmarkPoint::new(xyz[0], xyz[1], xyz[2]);
        }
        Ok(Self::new(landmarks))
    }

    pub fn landmarks(&self) -> &[LandmarkPoint; LANDMARK_COUNT] {
        &self.landmarks
    }

    pub fn handedness(&self) -> Option<Handedness> {
        self.handedness
    }

    pub fn point(&self, index: usize) -> LandmarkPoint {
        self.landmarks[index]
    }

    pub fn wrist(&self) -> LandmarkPoint {
        self.landmarks[WRIST]
    }
}
