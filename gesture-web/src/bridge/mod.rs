//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod hand_landmarks;

pub use hand_landmarks::{
    apply_hand_landmarks,
    configure_gestures,
    get_current_gesture,
    get_gesture_fps,
    get_zoom_level,
    reset_gesture_tracking,
};
