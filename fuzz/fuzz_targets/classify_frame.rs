#![no_main]

use libfuzzer_sys::fuzz_target;
use signlink_core::{GestureLabel, HandFrame, HandJoint};
use signlink_gesture::{classify, FingerStates};

fuzz_target!(|points: Vec<(f32, f32, f32)>| {
    let frame = HandFrame::from_points(&points);
    let label = classify(Some(&frame));

    assert_eq!(label, classify(Some(&frame)));
    if points.len() < HandJoint::COUNT {
        assert_eq!(label, GestureLabel::None);
        assert!(FingerStates::from_frame(&frame).is_none());
    }
});
