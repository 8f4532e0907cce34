//! Replay harness
//!
//! Drives a `GestureEngine` through a `FrameScript` on a manual clock. The
//! hold ticker is emulated the way the runtime arms it: first tick one
//! period after a hold starts, then every period until the hold stops
//! wanting ticks.

use std::time::Duration;

use signlink_core::{Clock, FrameTime, GestureLabel, ManualClock, SignLinkResult};
use signlink_gesture::{
    ActionTrigger, EngineConfig, EngineSnapshot, EngineStats, GestureAction, GestureEngine, GestureEvent,
    GestureTable, HoldUpdate, RecordingSink,
};
use tracing::debug;

use crate::{DetectorNoise, FrameScript};

/// Everything observable from one replay
#[derive(Debug, Clone, Default)]
pub struct ReplayReport {
    pub events: Vec<(FrameTime, GestureEvent)>,
    pub hold_updates: Vec<(FrameTime, HoldUpdate)>,
    pub actions: Vec<GestureAction>,
    pub stats: EngineStats,
    pub snapshot: EngineSnapshot,
}

impl ReplayReport {
    /// Confirmation times for one gesture
    pub fn confirmations_of(&self, gesture: GestureLabel) -> Vec<FrameTime> {
        self.events
            .iter()
            .filter_map(|(at, event)| match event {
                GestureEvent::Confirmed(c) if c.gesture == gesture => Some(*at),
                _ => None,
            })
            .collect()
    }

    pub fn confirmation_count(&self) -> usize {
        self.events
            .iter()
            .filter(|(_, e)| matches!(e, GestureEvent::Confirmed(_)))
            .count()
    }

    pub fn releases(&self) -> usize {
        self.events
            .iter()
            .filter(|(_, e)| matches!(e, GestureEvent::Released { .. }))
            .count()
    }

    pub fn actions_of(&self, gesture: GestureLabel, trigger: ActionTrigger) -> Vec<&GestureAction> {
        self.actions
            .iter()
            .filter(|a| a.gesture == gesture && a.trigger == trigger)
            .collect()
    }

    /// Progress percentages reported for a gesture, in order
    pub fn progress_of(&self, gesture: GestureLabel) -> Vec<f32> {
        self.hold_updates
            .iter()
            .filter_map(|(_, update)| match *update {
                HoldUpdate::Progress { gesture: g, percent } if g == gesture => Some(percent),
                HoldUpdate::Completed { gesture: g } if g == gesture => Some(100.0),
                _ => None,
            })
            .collect()
    }
}

/// Engine plus manual clock plus emulated hold ticker
pub struct ReplayHarness {
    engine: GestureEngine<RecordingSink>,
    clock: ManualClock,
    noise: Option<DetectorNoise>,
    next_tick: Option<FrameTime>,
}

impl ReplayHarness {
    pub fn new(config: EngineConfig, table: GestureTable) -> SignLinkResult<Self> {
        Ok(ReplayHarness {
            engine: GestureEngine::new(config, table, RecordingSink::new())?,
            clock: ManualClock::new(),
            noise: None,
            next_tick: None,
        })
    }

    /// Assistant table, default timing
    pub fn assistant() -> SignLinkResult<Self> {
        Self::new(EngineConfig::default(), GestureTable::assistant())
    }

    /// Navigation table with its global cooldown
    pub fn navigation() -> SignLinkResult<Self> {
        Self::new(EngineConfig::navigation(), GestureTable::navigation())
    }

    pub fn with_noise(mut self, noise: DetectorNoise) -> Self {
        self.noise = Some(noise);
        self
    }

    fn hold_tick(&self) -> Duration {
        self.engine.config().hold_tick
    }

    /// Deliver every tick due at or before `until`
    fn run_ticks(&mut self, until: FrameTime, report: &mut ReplayReport) {
        while let Some(at) = self.next_tick.filter(|&t| t <= until) {
            self.clock.set(at);
            if let Some(update) = self.engine.tick(self.clock.now()) {
                report.hold_updates.push((at, update));
            }
            self.next_tick = self.engine.hold_active().then(|| at + self.hold_tick());
        }
    }

    fn sync_ticker(&mut self, now: FrameTime) {
        match (self.engine.hold_active(), self.next_tick) {
            (true, None) => self.next_tick = Some(now + self.hold_tick()),
            (false, Some(_)) => self.next_tick = None,
            _ => {}
        }
    }

    /// Play a script; ticks continue through pauses up to `script.end()`
    pub fn run(&mut self, script: &FrameScript) -> ReplayReport {
        let mut report = ReplayReport::default();

        for scripted in script.frames() {
            self.run_ticks(scripted.at, &mut report);
            self.clock.set(scripted.at);

            let frame = match self.noise.as_mut() {
                Some(noise) => noise.apply(scripted.input),
                None => scripted.input.frame(),
            };

            if let Some(event) = self.engine.observe(frame.as_ref(), self.clock.now()) {
                report.events.push((scripted.at, event));
            }
            self.sync_ticker(scripted.at);
        }
        self.run_ticks(script.end(), &mut report);

        report.actions = std::mem::take(&mut self.engine.sink_mut().actions);
        report.stats = self.engine.stats();
        report.snapshot = self.engine.snapshot();
        debug!(
            frames = script.len(),
            events = report.events.len(),
            actions = report.actions.len(),
            "replay finished"
        );
        report
    }

    /// Tear the engine down as a closing camera would
    pub fn stop(&mut self) {
        self.engine.reset();
        self.next_tick = None;
    }

    pub fn engine(&self) -> &GestureEngine<RecordingSink> {
        &self.engine
    }

    pub fn now(&self) -> FrameTime {
        self.clock.now()
    }
}
