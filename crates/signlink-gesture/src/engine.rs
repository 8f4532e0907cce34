//! Gesture Engine - the per-instance pipeline
//!
//! `observe` runs once per detector callback and never blocks. `tick` is
//! the hold timer's independent time source and only matters while
//! `hold_active()` is true. `reset` is the teardown path: after it no
//! action can fire until new frames arrive.

use signlink_core::{FrameTime, GestureLabel, HandFrame, SignLinkResult};
use tracing::debug;

use crate::{
    ActionSink, ActionTrigger, Confirmation, Dispatcher, EngineConfig, FingerStates,
    GestureAction, GestureClassifier, GestureTable, HoldSession, HoldTimer, HoldUpdate,
    Stabilizer, Transition,
};

/// Engine output for one observed frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEvent {
    Confirmed(Confirmation),
    Released { previous: GestureLabel },
}

/// UI-facing state: overlay, status badge and progress bars
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineSnapshot {
    pub confirmed: GestureLabel,
    pub hand_detected: bool,
    /// Label of the most recent frame, before stabilization
    pub raw: GestureLabel,
    pub fingers: Option<FingerStates>,
    pub hold: Option<HoldSession>,
}

impl EngineSnapshot {
    /// Hold progress percentage for a gesture, 0 when not holding it
    pub fn hold_progress(&self, gesture: GestureLabel) -> f32 {
        self.hold
            .filter(|s| s.gesture == gesture)
            .map_or(0.0, |s| s.progress)
    }
}

/// Engine counters
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineStats {
    pub frames: u64,
    pub frames_with_hand: u64,
    pub malformed_frames: u64,
    pub confirmations: u64,
    pub releases: u64,
    pub holds_started: u64,
    pub holds_completed: u64,
    pub holds_cancelled: u64,
    pub actions_dispatched: u64,
    pub actions_suppressed: u64,
}

/// Classifier, stabilizer, hold timer and dispatcher owned together
pub struct GestureEngine<S> {
    config: EngineConfig,
    table: GestureTable,
    classifier: GestureClassifier,
    stabilizer: Stabilizer,
    hold: HoldTimer,
    dispatcher: Dispatcher<S>,
    hand_detected: bool,
    raw: GestureLabel,
    fingers: Option<FingerStates>,
    stats: EngineStats,
}

impl<S: ActionSink> GestureEngine<S> {
    /// Create an engine bound to `sink`
    pub fn new(config: EngineConfig, table: GestureTable, sink: S) -> SignLinkResult<Self> {
        config.validate()?;
        Ok(GestureEngine {
            classifier: GestureClassifier::new(config.thresholds),
            stabilizer: Stabilizer::new(config.history_size, config.confirmation_cooldown()),
            hold: HoldTimer::new(),
            dispatcher: Dispatcher::new(sink, config.global_cooldown),
            hand_detected: false,
            raw: GestureLabel::None,
            fingers: None,
            stats: EngineStats::default(),
            config,
            table,
        })
    }

    /// Process one detector callback; `None` means no hand in view
    pub fn observe(&mut self, frame: Option<&HandFrame>, now: FrameTime) -> Option<GestureEvent> {
        self.stats.frames += 1;
        self.hand_detected = frame.is_some();
        if let Some(f) = frame {
            self.stats.frames_with_hand += 1;
            if !f.is_complete() {
                self.stats.malformed_frames += 1;
            }
        }

        self.fingers = frame.and_then(FingerStates::from_frame);
        self.raw = self.classifier.classify(frame);

        match self.stabilizer.observe(self.raw, now)? {
            Transition::Released { previous } => {
                self.stats.releases += 1;
                self.cancel_hold();
                Some(GestureEvent::Released { previous })
            }
            Transition::Confirmed(confirmation) => {
                self.stats.confirmations += 1;
                self.on_confirmed(confirmation);
                Some(GestureEvent::Confirmed(confirmation))
            }
        }
    }

    fn on_confirmed(&mut self, confirmation: Confirmation) {
        let gesture = confirmation.gesture;

        if self.hold.session().is_some_and(|s| s.gesture != gesture) {
            self.cancel_hold();
        }

        let Some(binding) = self.table.get(gesture) else {
            debug!(%gesture, "confirmed gesture has no binding");
            return;
        };

        if binding.requires_hold() {
            // Dispatch only when a fresh session starts; a steady hand
            // re-confirming must not re-announce or restart the hold.
            if !self.hold.start(gesture, binding.hold, confirmation.at) {
                return;
            }
            self.stats.holds_started += 1;
        }

        let action = GestureAction::from_binding(binding, ActionTrigger::Confirmed, confirmation.at);
        self.dispatcher.dispatch(action);
    }

    fn cancel_hold(&mut self) {
        if self.hold.cancel().is_some() {
            self.stats.holds_cancelled += 1;
        }
    }

    /// Advance the hold timer; fires the bound action on completion
    pub fn tick(&mut self, now: FrameTime) -> Option<HoldUpdate> {
        let update = self.hold.advance(now)?;

        if let HoldUpdate::Completed { gesture } = update {
            self.stats.holds_completed += 1;
            if let Some(binding) = self.table.get(gesture) {
                let action = GestureAction::from_binding(binding, ActionTrigger::HoldCompleted, now);
                self.dispatcher.dispatch(action);
            }
        }

        Some(update)
    }

    /// Teardown: clear history, confirmed gesture and any hold session
    pub fn reset(&mut self) {
        self.stabilizer.clear();
        self.cancel_hold();
        self.dispatcher.reset();
        self.hand_detected = false;
        self.raw = GestureLabel::None;
        self.fingers = None;
        debug!("gesture engine reset");
    }

    /// A hold session is running and wants ticks
    pub fn hold_active(&self) -> bool {
        self.hold.is_ticking()
    }

    pub fn confirmed(&self) -> GestureLabel {
        self.stabilizer.confirmed()
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            confirmed: self.stabilizer.confirmed(),
            hand_detected: self.hand_detected,
            raw: self.raw,
            fingers: self.fingers,
            hold: self.hold.session().copied(),
        }
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            actions_dispatched: self.dispatcher.dispatched(),
            actions_suppressed: self.dispatcher.suppressed(),
            ..self.stats.clone()
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn table(&self) -> &GestureTable {
        &self.table
    }

    pub fn sink(&self) -> &S {
        self.dispatcher.sink()
    }

    pub fn sink_mut(&mut self) -> &mut S {
        self.dispatcher.sink_mut()
    }

    pub fn into_sink(self) -> S {
        self.dispatcher.into_sink()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecordingSink;
    use signlink_core::Landmark;
    use std::time::Duration;

    const FRAME_MS: u64 = 40;

    fn open_hand() -> HandFrame {
        let mut points = vec![Landmark::xy(0.5, 0.9)];
        // Thumb out to the left
        points.extend([(0.42, 0.85), (0.37, 0.78), (0.33, 0.72), (0.30, 0.66)].map(|(x, y)| Landmark::xy(x, y)));
        for i in 0..4 {
            let x = 0.42 + 0.07 * i as f32;
            points.extend([0.60, 0.50, 0.42, 0.35].map(|y| Landmark::xy(x, y)));
        }
        HandFrame::new(points)
    }

    fn engine(table: GestureTable) -> GestureEngine<RecordingSink> {
        GestureEngine::new(EngineConfig::default(), table, RecordingSink::new()).unwrap()
    }

    /// Feed `count` frames starting at frame index `start`, ticking between frames
    fn run(e: &mut GestureEngine<RecordingSink>, frame: Option<&HandFrame>, start: u64, count: u64) -> Vec<GestureEvent> {
        let mut events = Vec::new();
        for i in start..start + count {
            let now = FrameTime::from_millis(i * FRAME_MS);
            e.tick(now);
            events.extend(e.observe(frame, now));
        }
        events
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig {
            history_size: 0,
            ..EngineConfig::default()
        };
        assert!(GestureEngine::new(config, GestureTable::assistant(), RecordingSink::new()).is_err());
    }

    #[test]
    fn test_immediate_gesture_dispatches_on_confirmation() {
        let table = GestureTable::navigation();
        let mut e = engine(table);
        let hand = open_hand();

        let events = run(&mut e, Some(&hand), 0, 5);
        assert_eq!(events.len(), 1);
        assert_eq!(e.sink().actions.len(), 1);
        assert_eq!(e.sink().actions[0].action_name, "Voix ON");
        assert_eq!(e.sink().actions[0].trigger, ActionTrigger::Confirmed);
        assert!(!e.hold_active());
    }

    #[test]
    fn test_hold_gesture_fires_twice_then_stays_quiet() {
        let mut e = engine(GestureTable::assistant());
        let hand = open_hand();

        // Confirmation at frame 4 (160ms), hold completes 2s later
        run(&mut e, Some(&hand), 0, 5);
        assert!(e.hold_active());
        assert_eq!(e.sink().count(GestureLabel::OpenHand, ActionTrigger::Confirmed), 1);

        // Keep holding for 5 more seconds
        run(&mut e, Some(&hand), 5, 125);
        assert_eq!(e.sink().count(GestureLabel::OpenHand, ActionTrigger::Confirmed), 1);
        assert_eq!(e.sink().count(GestureLabel::OpenHand, ActionTrigger::HoldCompleted), 1);
        assert_eq!(e.snapshot().hold_progress(GestureLabel::OpenHand), 100.0);
        assert!(!e.hold_active());

        let stats = e.stats();
        assert_eq!(stats.holds_started, 1);
        assert_eq!(stats.holds_completed, 1);
        assert_eq!(stats.actions_dispatched, 2);
        assert!(stats.confirmations > 1);
    }

    #[test]
    fn test_release_before_completion_cancels() {
        let mut e = engine(GestureTable::assistant());
        let hand = open_hand();

        run(&mut e, Some(&hand), 0, 20);
        assert!(e.snapshot().hold_progress(GestureLabel::OpenHand) > 0.0);

        let events = run(&mut e, None, 20, 5);
        assert_eq!(events, vec![GestureEvent::Released { previous: GestureLabel::OpenHand }]);
        assert_eq!(e.snapshot().hold_progress(GestureLabel::OpenHand), 0.0);
        assert!(!e.hold_active());

        // Long after, nothing completes
        run(&mut e, None, 25, 100);
        assert_eq!(e.sink().count(GestureLabel::OpenHand, ActionTrigger::HoldCompleted), 0);
        assert_eq!(e.stats().holds_cancelled, 1);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut e = engine(GestureTable::assistant());
        let hand = open_hand();
        run(&mut e, Some(&hand), 0, 10);
        assert!(e.hold_active());

        e.reset();
        let snap = e.snapshot();
        assert_eq!(snap.confirmed, GestureLabel::None);
        assert!(!snap.hand_detected);
        assert!(snap.hold.is_none());
        assert!(!e.hold_active());
        assert!(e.tick(FrameTime::from_millis(10_000)).is_none());
        assert_eq!(e.sink().count(GestureLabel::OpenHand, ActionTrigger::HoldCompleted), 0);
    }

    #[test]
    fn test_malformed_frames_counted() {
        let mut e = engine(GestureTable::assistant());
        let short = HandFrame::new(vec![Landmark::default(); 12]);
        run(&mut e, Some(&short), 0, 3);

        let stats = e.stats();
        assert_eq!(stats.frames, 3);
        assert_eq!(stats.frames_with_hand, 3);
        assert_eq!(stats.malformed_frames, 3);
        assert!(e.snapshot().hand_detected);
        assert!(e.snapshot().fingers.is_none());
    }

    #[test]
    fn test_unbound_gesture_confirms_without_action() {
        let table = GestureTable::new(vec![]).unwrap();
        let mut e = engine(table);
        let hand = open_hand();

        let events = run(&mut e, Some(&hand), 0, 5);
        assert_eq!(events.len(), 1);
        assert!(e.sink().actions.is_empty());
    }

    #[test]
    fn test_hold_completion_passes_global_cooldown() {
        let table = GestureTable::navigation()
            .with_hold_secs(GestureLabel::OpenHand, 1.0)
            .unwrap();
        let mut e = GestureEngine::new(EngineConfig::navigation(), table, RecordingSink::new()).unwrap();
        let hand = open_hand();

        // Confirmed at 160ms, completed at 1160ms: inside the 1500ms window
        run(&mut e, Some(&hand), 0, 150);
        assert_eq!(e.sink().count(GestureLabel::OpenHand, ActionTrigger::Confirmed), 1);
        assert_eq!(e.sink().count(GestureLabel::OpenHand, ActionTrigger::HoldCompleted), 1);
        assert_eq!(e.stats().holds_completed, 1);
        assert_eq!(e.stats().actions_suppressed, 0);
    }

    #[test]
    fn test_global_cooldown_applies() {
        let config = EngineConfig {
            global_cooldown: Some(Duration::from_secs(10)),
            ..EngineConfig::default()
        };
        let mut e = GestureEngine::new(config, GestureTable::navigation(), RecordingSink::new()).unwrap();
        let hand = open_hand();

        // Re-confirmations every ~1s are all inside the 10s window
        run(&mut e, Some(&hand), 0, 100);
        assert_eq!(e.sink().actions.len(), 1);
        assert!(e.stats().actions_suppressed >= 2);
    }
}
