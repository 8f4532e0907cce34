//! SignLink Gesture Engine - Landmarks in, debounced actions out
//!
//! Strict linear pipeline, run once per camera frame:
//! 1. Classify the 21-point hand frame into a gesture label
//! 2. Stabilize: confirm only after K identical consecutive labels
//! 3. Hold: optionally require the confirmed gesture to persist
//! 4. Dispatch: rate-limited delivery to an injected action sink
//!
//! Each `GestureEngine` owns all of its state. Call sites that need
//! independent pipelines construct independent engines.

pub mod classifier;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod hold;
pub mod stabilizer;

pub use classifier::*;
pub use config::*;
pub use dispatch::*;
pub use engine::*;
pub use hold::*;
pub use stabilizer::*;
