//! Synthetic hand poses
//!
//! Idealized right hands, fingers pointing up the image, wrist at (0.5, 0.8)
//! and a palm size of 0.2. Used by the test suites and handy for driving the
//! pipeline without a camera.

use crate::landmarks::*;

const PALM: f32 = 0.2;

/// (x of the finger column, y of its MCP joint), index..pinky
const FINGER_BASES: [(f32, f32); 4] = [(0.43, 0.62), (0.5, 0.6), (0.57, 0.62), (0.63, 0.65)];

fn straight_finger(points: &mut [LandmarkPoint; LANDMARK_COUNT], finger: usize) {
    let (x, y) = FINGER_BASES[finger];
    let (mcp, pip, dip, tip) = finger_indices(finger);
    points[mcp] = LandmarkPoint::new(x, y, 0.0);
    points[pip] = LandmarkPoint::new(x, y - 0.1, 0.0);
    points[dip] = LandmarkPoint::new(x, y - 0.15, 0.0);
    points[tip] = LandmarkPoint::new(x, y - 0.2, 0.0);
}

fn curled_finger(points: &mut [LandmarkPoint; LANDMARK_COUNT], finger: usize) {
    let (x, y) = FINGER_BASES[finger];
    let (mcp, pip, dip, tip) = finger_indices(finger);
    points[mcp] = LandmarkPoint::new(x, y, 0.0);
    points[pip] = LandmarkPoint::new(x, y - 0.07, 0.0);
    points[dip] = LandmarkPoint::new(x + 0.02, y - 0.04, 0.0);
    points[tip] = LandmarkPoint::new(x + 0.02, y - 0.01, 0.0);
}

fn finger_indices(finger: usize) -> (usize, usize, usize, usize) {
    let mcp = INDEX_MCP + finger * 4;
    (mcp, mcp + 1, mcp + 2, mcp + 3)
}

fn thumb(points: &mut [LandmarkPoint; LANDMARK_COUNT], tip: LandmarkPoint) {
    points[THUMB_CMC] = LandmarkPoint::new(0.46, 0.77, 0.0);
    // IP and MCP spread between the CMC and the tip
    points[THUMB_MCP] = LandmarkPoint::new(
        (points[THUMB_CMC].x * 2.0 + tip.x) / 3.0,
        (points[THUMB_CMC].y * 2.0 + tip.y) / 3.0,
        0.0,
    );
    points[THUMB_IP] = LandmarkPoint::new(
        (points[THUMB_CMC].x + tip.x * 2.0) / 3.0,
        (points[THUMB_CMC].y + tip.y * 2.0) / 3.0,
        0.0,
    );
    points[THUMB_TIP] = tip;
}

fn build(extended: [bool; 4], thumb_tip: LandmarkPoint) -> Frame {
    let mut points = [LandmarkPoint::default(); LANDMARK_COUNT];
    points[WRIST] = LandmarkPoint::new(0.5, 0.8, 0.0);
    for (finger, &straight) in extended.iter().enumerate() {
        if straight {
            straight_finger(&mut points, finger);
        } else {
            curled_finger(&mut points, finger);
        }
    }
    thumb(&mut points, thumb_tip);
    Frame::new(points)
}

/// Thumb stretched out to the side
const THUMB_OUT: LandmarkPoint = LandmarkPoint::new(0.29, 0.63, 0.0);

/// Thumb folded across the palm, away from the index tip
const THUMB_TUCKED: LandmarkPoint = LandmarkPoint::new(0.55, 0.74, 0.0);

/// All fingers and thumb extended
pub fn open_hand() -> Frame {
    build([true; 4], THUMB_OUT)
}

/// All fingers curled, thumb tucked
pub fn fist() -> Frame {
    build([false; 4], THUMB_TUCKED)
}

/// Index extended, the rest curled
pub fn point_hand() -> Frame {
    build([true, false, false, false], THUMB_TUCKED)
}

/// Index extended, thumb tip `normalized_pinch` palm sizes left of the index tip
pub fn pinch_hand(normalized_pinch: f32) -> Frame {
    let (x, y) = FINGER_BASES[0];
    let tip = LandmarkPoint::new(x - normalized_pinch * PALM, y - 0.2, 0.0);
    build([true, false, false, false], tip)
}

/// Same pose shifted across the image
pub fn translated(frame: &Frame, dx: f32, dy: f32) -> Frame {
    let mut points = *frame.landmarks();
    for p in points.iter_mut() {
        p.x += dx;
        p.y += dy;
    }
    Frame::new(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palm_size() {
        let frame = open_hand();
        let palm = nalgebra::distance(&frame.wrist().planar(), &frame.point(MIDDLE_MCP).planar());
        assert!((palm - PALM).abs() < 1e-6);
    }

    #[test]
    fn test_translation_moves_wrist() {
        let moved = translated(&open_hand(), 0.1, -0.05);
        assert!((moved.wrist().x - 0.6).abs() < 1e-6);
        assert!((moved.wrist().y - 0.75).abs() < 1e-6);
    }
}
