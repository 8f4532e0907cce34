//! Error types for SignLink
//!
//! Frame processing never fails; every variant here belongs to the
//! configuration and session boundary.

use thiserror::Error;

use crate::GestureLabel;

/// Core SignLink errors
#[derive(Error, Debug)]
pub enum SignLinkError {
    // Engine configuration errors
    #[error("History size must be at least 1, got {0}")]
    InvalidHistorySize(usize),

    #[error("Invalid timing for {name}: must be greater than zero")]
    InvalidTiming { name: &'static str },

    #[error("Invalid classifier threshold {name}: {value}")]
    InvalidThreshold { name: &'static str, value: f32 },

    // Gesture table errors
    #[error("Unknown gesture label: {0}")]
    UnknownGesture(String),

    #[error("Gesture {0} cannot be bound to an action")]
    UnbindableGesture(GestureLabel),

    #[error("Duplicate binding for gesture {0}")]
    DuplicateBinding(GestureLabel),

    #[error("Invalid hold duration for {gesture}: {seconds}s")]
    InvalidHoldDuration { gesture: GestureLabel, seconds: f64 },

    // Config document errors
    #[error("Invalid duration {value:?}: {reason}")]
    InvalidDuration { value: String, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Runtime errors
    #[error("Logging already initialized: {0}")]
    LoggingInit(String),

    #[error("Gesture session closed")]
    SessionClosed,
}

/// Result type for SignLink operations
pub type SignLinkResult<T> = Result<T, SignLinkError>;
