//! SignLink Test Harness - synthetic camera sessions for the gesture engine
//!
//! This crate provides:
//! - Canonical hand poses for every gesture
//! - Timed frame scripts
//! - Seeded detector-noise injection
//! - A replay harness driving an engine with hold ticks
//! - End-to-end gesture scenarios

pub mod noise;
pub mod poses;
pub mod replay;
pub mod scenarios;
pub mod script;

pub use noise::*;
pub use poses::*;
pub use replay::*;
pub use scenarios::*;
pub use script::*;
