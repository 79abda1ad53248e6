//! Error types for gesture pipeline construction
//!
//! Per-frame processing never fails: missing hands and degenerate geometry
//! degrade to "no gesture". Only configuration and explicit frame building
//! can be rejected.

use thiserror::Error;

/// Result alias for fallible gesture operations
pub type GestureResult<T> = Result<T, GestureError>;

/// Errors raised while configuring the pipeline or building frames
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GestureError {
    /// A tunable is outside its sane range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Landmark data does not describe a full hand
    #[error("Invalid frame: expected {expected} landmarks, got {actual}")]
    InvalidFrame { expected: usize, actual: usize },
}
