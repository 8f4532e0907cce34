//! SignLink Core - Fundamental types and primitives
//!
//! This crate defines the core types used throughout the gesture engine:
//! - Hand landmarks and the 21-joint anatomical index scheme
//! - The closed gesture label vocabulary
//! - Frame time primitives and clocks
//! - The workspace error type

pub mod clock;
pub mod error;
pub mod gesture;
pub mod landmark;
pub mod time;

pub use clock::*;
pub use error::*;
pub use gesture::*;
pub use landmark::*;
pub use time::*;
