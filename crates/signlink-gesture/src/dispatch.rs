//! Debounce & Dispatch - delivers actions to the injected sink
//!
//! The engine never performs side effects itself. Navigation, audio
//! toggles and speech belong to whoever implements `ActionSink`.

use std::time::Duration;

use signlink_core::{FrameTime, GestureLabel};
use tracing::{debug, info};

use crate::GestureBinding;

/// Why an action fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionTrigger {
    /// Stabilizer confirmed the gesture
    Confirmed,
    /// A hold-configured gesture was sustained to 100%
    HoldCompleted,
}

/// Action delivered to the sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GestureAction {
    pub gesture: GestureLabel,
    pub display_name: String,
    pub action_name: String,
    pub trigger: ActionTrigger,
    pub at: FrameTime,
}

impl GestureAction {
    pub fn from_binding(binding: &GestureBinding, trigger: ActionTrigger, at: FrameTime) -> Self {
        GestureAction {
            gesture: binding.label,
            display_name: binding.display_name.clone(),
            action_name: binding.action_name.clone(),
            trigger,
            at,
        }
    }
}

/// Receiver of dispatched gesture actions
pub trait ActionSink {
    fn on_gesture(&mut self, action: &GestureAction);
}

impl<F> ActionSink for F
where
    F: FnMut(&GestureAction),
{
    fn on_gesture(&mut self, action: &GestureAction) {
        self(action)
    }
}

/// Sink that keeps every action, for replays and assertions
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub actions: Vec<GestureAction>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, gesture: GestureLabel, trigger: ActionTrigger) -> usize {
        self.actions
            .iter()
            .filter(|a| a.gesture == gesture && a.trigger == trigger)
            .count()
    }
}

impl ActionSink for RecordingSink {
    fn on_gesture(&mut self, action: &GestureAction) {
        self.actions.push(action.clone());
    }
}

/// Sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ActionSink for NullSink {
    fn on_gesture(&mut self, _action: &GestureAction) {}
}

/// Rate limiter in front of the sink
pub struct Dispatcher<S> {
    sink: S,
    global_cooldown: Option<Duration>,
    last_fired: Option<FrameTime>,
    dispatched: u64,
    suppressed: u64,
}

impl<S: ActionSink> Dispatcher<S> {
    pub fn new(sink: S, global_cooldown: Option<Duration>) -> Self {
        Dispatcher {
            sink,
            global_cooldown,
            last_fired: None,
            dispatched: 0,
            suppressed: 0,
        }
    }

    /// Deliver an action unless the global cooldown is still running.
    /// Hold completions always pass but still restart the cooldown.
    /// Returns true when the sink was invoked.
    pub fn dispatch(&mut self, action: GestureAction) -> bool {
        let gated = action.trigger == ActionTrigger::Confirmed;
        if let (true, Some(cooldown), Some(last)) = (gated, self.global_cooldown, self.last_fired) {
            if action.at.since(last) < cooldown {
                self.suppressed += 1;
                debug!(gesture = %action.gesture, action = %action.action_name, "action suppressed by cooldown");
                return false;
            }
        }

        self.last_fired = Some(action.at);
        self.dispatched += 1;
        info!(
            gesture = %action.gesture,
            name = %action.display_name,
            action = %action.action_name,
            trigger = ?action.trigger,
            "gesture action"
        );
        self.sink.on_gesture(&action);
        true
    }

    /// Forget the last firing time
    pub fn reset(&mut self) {
        self.last_fired = None;
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    pub fn suppressed(&self) -> u64 {
        self.suppressed
    }
}
