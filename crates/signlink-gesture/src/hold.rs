//! Hold Timer - sustained-presence gate for hold-configured gestures
//!
//! `Idle -> Holding -> Completed`. A completed session stays parked until
//! the gesture is lost or replaced, so a steady hand cannot re-trigger the
//! action by re-confirming.

use std::time::Duration;

use signlink_core::{FrameTime, GestureLabel};
use tracing::debug;

/// Phase of an active hold session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldPhase {
    Holding,
    Completed,
}

/// One hold attempt for one gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoldSession {
    pub gesture: GestureLabel,
    pub started_at: FrameTime,
    pub duration: Duration,
    /// Percentage, 0.0 to 100.0
    pub progress: f32,
    pub phase: HoldPhase,
}

impl HoldSession {
    fn progress_at(&self, now: FrameTime) -> f32 {
        let elapsed = now.since(self.started_at).as_secs_f64();
        let total = self.duration.as_secs_f64();
        if total <= 0.0 {
            return 100.0;
        }
        ((elapsed / total) * 100.0).min(100.0) as f32
    }
}

/// Output of a hold tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HoldUpdate {
    Progress { gesture: GestureLabel, percent: f32 },
    /// Progress reached 100%; emitted once per session
    Completed { gesture: GestureLabel },
}

/// Single-slot hold state machine
#[derive(Debug, Clone, Default)]
pub struct HoldTimer {
    session: Option<HoldSession>,
}

impl HoldTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin holding `gesture` unless a session for it already exists.
    /// Any session for a different gesture is cancelled first.
    /// Returns true when a new session was started.
    pub fn start(&mut self, gesture: GestureLabel, duration: Duration, now: FrameTime) -> bool {
        if self.session.is_some_and(|s| s.gesture == gesture) {
            return false;
        }
        self.cancel();

        debug!(%gesture, ?duration, "hold started");
        self.session = Some(HoldSession {
            gesture,
            started_at: now,
            duration,
            progress: 0.0,
            phase: HoldPhase::Holding,
        });
        true
    }

    /// Recompute progress; `None` when idle or already completed
    pub fn advance(&mut self, now: FrameTime) -> Option<HoldUpdate> {
        let session = self.session.as_mut()?;
        if session.phase == HoldPhase::Completed {
            return None;
        }

        session.progress = session.progress_at(now);
        if session.progress >= 100.0 {
            session.phase = HoldPhase::Completed;
            debug!(gesture = %session.gesture, "hold completed");
            return Some(HoldUpdate::Completed {
                gesture: session.gesture,
            });
        }

        Some(HoldUpdate::Progress {
            gesture: session.gesture,
            percent: session.progress,
        })
    }

    /// Drop any session. Returns the gesture if it was still holding.
    pub fn cancel(&mut self) -> Option<GestureLabel> {
        let session = self.session.take()?;
        if session.phase == HoldPhase::Holding {
            debug!(gesture = %session.gesture, progress = session.progress, "hold cancelled");
            return Some(session.gesture);
        }
        None
    }

    pub fn session(&self) -> Option<&HoldSession> {
        self.session.as_ref()
    }

    /// A session is holding and needs ticks
    pub fn is_ticking(&self) -> bool {
        self.session
            .is_some_and(|s| s.phase == HoldPhase::Holding)
    }

    /// Progress for a gesture, 0 when it has no session
    pub fn progress_for(&self, gesture: GestureLabel) -> f32 {
        self.session
            .filter(|s| s.gesture == gesture)
            .map_or(0.0, |s| s.progress)
    }
}
