//! Time primitives for the gesture pipeline
//!
//! Every pipeline timestamp is a `FrameTime`: monotonic microseconds since
//! the owning camera session started. Callers pass it in explicitly, which
//! keeps the engine deterministic and lets tests drive time by hand.

use std::ops::{Add, Sub};
use std::time::Duration;

/// Session-relative monotonic timestamp
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FrameTime(pub u64);

impl FrameTime {
    pub const ZERO: FrameTime = FrameTime(0);

    #[inline]
    pub fn from_micros(micros: u64) -> Self {
        FrameTime(micros)
    }

    #[inline]
    pub fn from_millis(millis: u64) -> Self {
        FrameTime(millis.saturating_mul(1000))
    }

    #[inline]
    pub fn from_duration(elapsed: Duration) -> Self {
        FrameTime(u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX))
    }

    #[inline]
    pub fn as_micros(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn as_millis(self) -> u64 {
        self.0 / 1000
    }

    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }

    /// Time elapsed since `earlier`, zero if `earlier` is in the future
    #[inline]
    pub fn since(self, earlier: FrameTime) -> Duration {
        self - earlier
    }

    #[inline]
    pub fn saturating_add(self, duration: Duration) -> Self {
        FrameTime(self.0.saturating_add(duration.as_micros() as u64))
    }
}

impl Add<Duration> for FrameTime {
    type Output = FrameTime;

    #[inline]
    fn add(self, rhs: Duration) -> Self::Output {
        self.saturating_add(rhs)
    }
}

impl Sub<FrameTime> for FrameTime {
    type Output = Duration;

    #[inline]
    fn sub(self, rhs: FrameTime) -> Self::Output {
        Duration::from_micros(self.0.saturating_sub(rhs.0))
    }
}

impl std::fmt::Debug for FrameTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t({:.3}ms)", self.0 as f64 / 1000.0)
    }
}
