//! Hand landmark entry point and per-page gesture state
//!
//! Receives one MediaPipe hand per call from JavaScript, runs it through the
//! gesture pipeline and hands the result back as a plain JS object.

use std::cell::RefCell;

use log::{info, warn};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::GestureConfig;
use crate::control::{ControlEvent, ZoomLevel};
use crate::error::GestureError;
use crate::frame_rate::FrameRateMeter;
use crate::landmarks::{Handedness, FLAT_LEN};
use crate::pipeline::{FrameOutput, GesturePipeline};

impl From<GestureError> for JsValue {
    fn from(err: GestureError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// What JS receives per frame
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BridgeOutput {
    #[serde(flatten)]
    frame: FrameOutput,
    zoom_level: f32,
    fps: u32,
}

struct GestureState {
    pipeline: GesturePipeline,
    zoom: ZoomLevel,
    fps: FrameRateMeter,
}

impl GestureState {
    fn new(pipeline: GesturePipeline) -> Self {
        Self {
            zoom: ZoomLevel::new(pipeline.config().zoom_range),
            pipeline,
            fps: FrameRateMeter::new(),
        }
    }
}

impl Default for GestureState {
    fn default() -> Self {
        Self::new(GesturePipeline::default())
    }
}

// Thread-local storage (WASM is single-threaded)
thread_local! {
    static GESTURE_STATE: RefCell<GestureState> = RefCell::new(GestureState::default());
}

/// Seconds since page load, or wall-clock seconds when there is no window
fn now_secs() -> f64 {
    let ms = web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now);
    ms / 1000.0
}

// ============================================================================
// WASM API
// ============================================================================

/// Replace the gesture configuration; all tracking state starts over
#[wasm_bindgen(js_name = configureGestures)]
pub fn configure_gestures(config: JsValue) -> Result<(), JsValue> {
    let config: GestureConfig = if config.is_undefined() || config.is_null() {
        GestureConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)
            .map_err(|e| GestureError::InvalidConfig(e.to_string()))?
    };
    let pipeline = GesturePipeline::new(config)?;
    info!("gesture config applied: {:?}", pipeline.config());

    GESTURE_STATE.with(|state_cell| {
        *state_cell.borrow_mut() = GestureState::new(pipeline);
    });
    Ok(())
}

/// Process one hand: 63 floats `[x0, y0, z0, ...]`, or an empty array for no hand
#[wasm_bindgen(js_name = applyHandLandmarks)]
pub fn apply_hand_landmarks(flat_data: &[f32], handedness: Option<String>) -> JsValue {
    if !flat_data.is_empty() && flat_data.len() != FLAT_LEN {
        warn!(
            "Invalid hand landmark length: {} (expected {}), treating as no hand",
            flat_data.len(),
            FLAT_LEN
        );
    }
    let handedness = handedness.as_deref().map(Handedness::from_label);
    let now = now_secs();

    let output = GESTURE_STATE.with(|state_cell| {
        let mut state = state_cell.borrow_mut();
        let fps = state.fps.tick(now);
        let frame = state.pipeline.process_flat(flat_data, handedness, now);

        for event in &frame.events {
            if let ControlEvent::Zoom { delta, .. } = event {
                state.zoom.apply(*delta);
            }
        }

        BridgeOutput {
            frame,
            zoom_level: state.zoom.level(),
            fps,
        }
    });

    output
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap_or_else(|e| {
            warn!("Failed to serialize gesture output: {}", e);
            JsValue::NULL
        })
}

/// Camera stopped: drop filters, gesture state and control baselines
#[wasm_bindgen(js_name = resetGestureTracking)]
pub fn reset_gesture_tracking() {
    GESTURE_STATE.with(|state_cell| {
        state_cell.borrow_mut().pipeline.reset();
    });
}

/// Absolute zoom level accumulated from pinch gestures
#[wasm_bindgen(js_name = getZoomLevel)]
pub fn get_zoom_level() -> f32 {
    GESTURE_STATE.with(|state_cell| state_cell.borrow().zoom.level())
}

/// Hand frames processed during the last full second
#[wasm_bindgen(js_name = getGestureFps)]
pub fn get_gesture_fps() -> u32 {
    GESTURE_STATE.with(|state_cell| state_cell.borrow().fps.fps())
}

/// Currently confirmed gesture name
#[wasm_bindgen(js_name = getCurrentGesture)]
pub fn get_current_gesture() -> String {
    GESTURE_STATE.with(|state_cell| state_cell.borrow().pipeline.current_gesture().to_string())
}
