//! SignLink Runtime - camera session orchestration
//!
//! One session owns one gesture engine and runs it on a tokio task:
//! 1. Receive detector frames over a bounded channel
//! 2. Classify, stabilize and dispatch (synchronously, per frame)
//! 3. Arm a hold ticker only while a hold is in progress
//! 4. Publish a UI snapshot after every step
//! 5. On stop, tear the engine down before returning

pub mod config;
pub mod controls;
pub mod session;
pub mod telemetry;

pub use config::*;
pub use controls::*;
pub use session::*;
pub use telemetry::*;
