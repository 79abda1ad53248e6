//! Finger curl angle using the law of cosines
//!
//! Angle at the middle joint of a (base, middle, tip) triad, measured in the
//! image plane.

use std::f32::consts::PI;

use nalgebra::{distance, Point2};

/// Calculate the joint angle in radians
///
/// Uses the law of cosines: cos(θ) = (ab² + bc² − ac²) / (2·ab·bc)
///
/// Returns angle in radians:
/// - ~1.57 = finger bent at a right angle
/// - PI = finger fully straight
pub fn calculate_curl_angle(base: Point2<f32>, joint: Point2<f32>, tip: Point2<f32>) -> f32 {
    let ab = distance(&base, &joint);
    let bc = distance(&joint, &tip);
    let ac = distance(&base, &tip);

    // Handle degenerate case
    if ab < 0.0001 || bc < 0.0001 {
        return PI; // Assume straight if we can't calculate
    }

    let cos_angle = ((ab * ab + bc * bc - ac * ac) / (2.0 * ab * bc)).clamp(-1.0, 1.0);
    cos_angle.acos()
}
