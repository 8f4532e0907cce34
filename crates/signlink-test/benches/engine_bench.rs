//! Benchmarks for the per-frame engine path

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use signlink_core::{FrameTime, HandFrame};
use signlink_gesture::{EngineConfig, GestureEngine, GestureTable, NullSink, Stabilizer};
use signlink_test::{FrameScript, HandPose, ReplayHarness};

fn bench_engine_observe_steady(c: &mut Criterion) {
    let mut engine = GestureEngine::new(EngineConfig::default(), GestureTable::assistant(), NullSink).unwrap();
    let frame = HandPose::ThumbsUp.frame();

    c.bench_function("engine_observe_steady", |b| {
        let mut t = 0u64;
        b.iter(|| {
            t += 33_000;
            black_box(engine.observe(Some(&frame), FrameTime::from_micros(t)))
        })
    });
}

fn bench_engine_observe_alternating(c: &mut Criterion) {
    let mut engine = GestureEngine::new(EngineConfig::default(), GestureTable::assistant(), NullSink).unwrap();
    let frames: Vec<HandFrame> = [HandPose::OpenHand, HandPose::ClosedFist]
        .iter()
        .map(|p| p.frame())
        .collect();

    c.bench_function("engine_observe_alternating", |b| {
        let mut t = 0u64;
        b.iter(|| {
            t += 33_000;
            let frame = &frames[(t / 33_000 % 2) as usize];
            black_box(engine.observe(Some(frame), FrameTime::from_micros(t)))
        })
    });
}

fn bench_stabilizer_observe(c: &mut Criterion) {
    let config = EngineConfig::default();
    let mut stabilizer = Stabilizer::new(config.history_size, config.confirmation_cooldown());
    let label = HandPose::PointLeft.expected();

    c.bench_function("stabilizer_observe", |b| {
        let mut t = 0u64;
        b.iter(|| {
            t += 33_000;
            black_box(stabilizer.observe(black_box(label), FrameTime::from_micros(t)))
        })
    });
}

fn bench_replay_ten_seconds(c: &mut Criterion) {
    let script = FrameScript::default()
        .show(HandPose::OpenHand, Duration::from_secs(3))
        .absent(Duration::from_secs(1))
        .show(HandPose::PointRight, Duration::from_secs(3))
        .show(HandPose::ThumbsUp, Duration::from_secs(3));

    c.bench_function("replay_ten_seconds", |b| {
        b.iter(|| {
            let mut harness = ReplayHarness::assistant().unwrap();
            black_box(harness.run(&script).actions.len())
        })
    });
}

criterion_group!(
    benches,
    bench_engine_observe_steady,
    bench_engine_observe_alternating,
    bench_stabilizer_observe,
    bench_replay_ten_seconds,
);
criterion_main!(benches);
