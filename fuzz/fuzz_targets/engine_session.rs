#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use signlink_core::{FrameTime, HandFrame};
use signlink_gesture::{ActionTrigger, EngineConfig, GestureEngine, GestureTable, RecordingSink};

#[derive(Arbitrary, Debug)]
enum Step {
    Frame {
        gap_ms: u8,
        points: Option<Vec<(f32, f32, f32)>>,
    },
    Tick {
        gap_ms: u8,
    },
    Reset,
}

fuzz_target!(|steps: Vec<Step>| {
    let Ok(mut engine) = GestureEngine::new(EngineConfig::default(), GestureTable::assistant(), RecordingSink::new())
    else {
        return;
    };
    let mut now = 0u64;

    for step in steps {
        match step {
            Step::Frame { gap_ms, points } => {
                now += gap_ms as u64;
                let frame = points.map(|p| HandFrame::from_points(&p));
                engine.observe(frame.as_ref(), FrameTime::from_millis(now));
            }
            Step::Tick { gap_ms } => {
                now += gap_ms as u64;
                engine.tick(FrameTime::from_millis(now));
            }
            Step::Reset => {
                engine.reset();
                assert!(!engine.hold_active());
            }
        }
    }

    // Each hold session completes at most once
    let stats = engine.stats();
    assert!(stats.holds_completed <= stats.holds_started);
    let completed = engine.sink().actions.iter().filter(|a| a.trigger == ActionTrigger::HoldCompleted).count();
    assert_eq!(completed as u64, stats.holds_completed);
});
