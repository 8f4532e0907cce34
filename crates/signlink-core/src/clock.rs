//! Clock sources for frame timestamps

use std::cell::Cell;
use std::time::Duration;

use crate::FrameTime;

/// Source of session-relative timestamps
pub trait Clock {
    fn now(&self) -> FrameTime;
}

/// Hand-driven clock for replays and tests
#[derive(Debug, Default)]
pub struct ManualClock {
    value: Cell<FrameTime>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward
    pub fn advance(&self, dt: Duration) -> FrameTime {
        let next = self.value.get() + dt;
        self.value.set(next);
        next
    }

    /// Jump to a time; earlier targets are ignored
    pub fn set(&self, time: FrameTime) {
        if time > self.value.get() {
            self.value.set(time);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> FrameTime {
        self.value.get()
    }
}
