//! Gesture Web - hand landmark gesture recognition for the browser
//!
//! Turns a per-frame stream of 21 MediaPipe hand landmarks into a stable
//! gesture (pinch, point, open, fist) and control events (zoom, position,
//! swipe). The core is plain Rust; `bridge` holds the wasm_bindgen entry
//! points.
//!
//! ```
//! use gesture_web::{GestureConfig, GesturePipeline, GestureLabel};
//!
//! let mut pipeline = GesturePipeline::new(GestureConfig::default()).unwrap();
//! // 63 floats per hand; an empty buffer means no hand in view
//! let out = pipeline.process_flat(&[], None, 0.0);
//! assert_eq!(out.gesture, GestureLabel::None);
//! assert!(out.events.is_empty());
//! ```

pub mod classifier;
pub mod config;
pub mod control;
pub mod error;
pub mod frame_rate;
pub mod landmarks;
pub mod physics;
pub mod pipeline;

/// Synthetic hands for tests and camera-less runs, not part of the stable API
#[doc(hidden)]
pub mod poses;

mod bridge;

use wasm_bindgen::prelude::*;

pub use bridge::{
    apply_hand_landmarks, configure_gestures, get_current_gesture, get_gesture_fps,
    get_zoom_level, reset_gesture_tracking,
};
pub use classifier::{Classification, FeatureSet, GestureLabel};
pub use config::{FilterNoise, GestureConfig};
pub use control::{ControlEvent, ZoomLevel};
pub use error::{GestureError, GestureResult};
pub use landmarks::{Frame, Handedness, LandmarkPoint};
pub use physics::SwipeDirection;
pub use pipeline::{FrameOutput, GesturePipeline};

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Route `log` output to the browser console
///
/// `level` is one of "trace", "debug", "info", "warn", "error"; anything else
/// means info.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: &str) {
    let log_level = match level.to_lowercase().as_str() {
        "trace" => log::Level::Trace,
        "debug" => log::Level::Debug,
        "warn" => log::Level::Warn,
        "error" => log::Level::Error,
        _ => log::Level::Info,
    };

    wasm_logger::init(wasm_logger::Config::new(log_level));
    log::info!("✅ Gesture tracking initialized (log level {})", log_level);
}
