//! Physics module - filtering, joint angles and motion
//!
//! Re-exports only. All logic in submodules.

mod angles;
mod detection;
mod kalman;
mod smoother;
mod velocity;

pub use angles::calculate_curl_angle;
pub use detection::{SwipeDetector, SwipeDirection};
pub use kalman::KalmanFilter;
pub use smoother::{FilterBank, LandmarkSmoother};
pub use velocity::{VelocityTracker, MIN_ELAPSED_SECS, VELOCITY_SAMPLES};
