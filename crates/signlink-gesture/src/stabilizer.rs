//! Stabilizer - temporal voting over recent per-frame labels
//!
//! Raw classification flickers with detector noise. A gesture is only
//! confirmed once the last K labels are identical, trading K frames of
//! latency for immunity to single-frame misclassification.

use std::collections::VecDeque;
use std::time::Duration;

use signlink_core::{FrameTime, GestureLabel};
use tracing::debug;

/// A gesture was confirmed (or re-confirmed after the cooldown)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmation {
    pub gesture: GestureLabel,
    pub at: FrameTime,
    /// Same gesture as the previous confirmation
    pub repeat: bool,
}

/// Change in confirmed state produced by one observation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Confirmed(Confirmation),
    /// History became uniformly `none` while a gesture was confirmed
    Released { previous: GestureLabel },
}

/// Fixed-capacity vote window plus the confirmed gesture
#[derive(Debug, Clone)]
pub struct Stabilizer {
    history: VecDeque<GestureLabel>,
    capacity: usize,
    cooldown: Duration,
    confirmed: GestureLabel,
    confirmed_at: Option<FrameTime>,
}

impl Stabilizer {
    /// Create a stabilizer over `capacity` frames (at least 1)
    pub fn new(capacity: usize, cooldown: Duration) -> Self {
        let capacity = capacity.max(1);
        Stabilizer {
            history: VecDeque::with_capacity(capacity + 1),
            capacity,
            cooldown,
            confirmed: GestureLabel::None,
            confirmed_at: None,
        }
    }

    /// Feed one frame's label
    pub fn observe(&mut self, label: GestureLabel, now: FrameTime) -> Option<Transition> {
        self.history.push_back(label);
        while self.history.len() > self.capacity {
            self.history.pop_front();
        }

        let stable = self.stable_label()?;

        if stable.is_none() {
            let previous = self.confirmed;
            self.confirmed = GestureLabel::None;
            self.confirmed_at = None;
            if previous.is_none() {
                return None;
            }
            debug!(gesture = %previous, "gesture released");
            return Some(Transition::Released { previous });
        }

        let repeat = stable == self.confirmed;
        let cooled_down = self
            .confirmed_at
            .map_or(true, |at| now.since(at) > self.cooldown);

        if repeat && !cooled_down {
            return None;
        }

        self.confirmed = stable;
        self.confirmed_at = Some(now);
        debug!(gesture = %stable, repeat, at = ?now, "gesture confirmed");

        Some(Transition::Confirmed(Confirmation {
            gesture: stable,
            at: now,
            repeat,
        }))
    }

    /// The common label once the window is full and uniform
    pub fn stable_label(&self) -> Option<GestureLabel> {
        if self.history.len() < self.capacity {
            return None;
        }
        let first = *self.history.front()?;
        self.history
            .iter()
            .all(|&label| label == first)
            .then_some(first)
    }

    pub fn confirmed(&self) -> GestureLabel {
        self.confirmed
    }

    pub fn confirmed_at(&self) -> Option<FrameTime> {
        self.confirmed_at
    }

    pub fn history(&self) -> impl Iterator<Item = GestureLabel> + '_ {
        self.history.iter().copied()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop history and confirmed state
    pub fn clear(&mut self) {
        self.history.clear();
        self.confirmed = GestureLabel::None;
        self.confirmed_at = None;
    }
}
