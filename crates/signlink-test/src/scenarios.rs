//! End-to-end gesture scenarios
//!
//! Each scenario replays a scripted camera session and returns the report;
//! the tests below check the behaviour users rely on:
//! - One confirmation per steady gesture, spaced by the cooldown
//! - Flicker never confirms
//! - Holds fire once, and only when held long enough
//! - Losing the hand resets everything
//! - Teardown silences the engine

use std::time::Duration;

use signlink_core::SignLinkResult;

use crate::{DetectorNoise, FrameScript, HandPose, NoiseConfig, ReplayHarness, ReplayReport};

// ============================================================================
// SCENARIOS
// ============================================================================

/// A pose shown for exactly `frames` frames
pub fn scenario_brief_pose(pose: HandPose, frames: usize) -> SignLinkResult<ReplayReport> {
    let mut harness = ReplayHarness::assistant()?;
    Ok(harness.run(&FrameScript::default().show_frames(pose, frames)))
}

/// Two poses swapped every frame
pub fn scenario_flicker(a: HandPose, b: HandPose, duration: Duration) -> SignLinkResult<ReplayReport> {
    let mut harness = ReplayHarness::assistant()?;
    let mut script = FrameScript::default();
    let frames = duration.as_millis() / script.interval().as_millis().max(1);
    for i in 0..frames {
        script = script.show_frames(if i % 2 == 0 { a } else { b }, 1);
    }
    Ok(harness.run(&script))
}

/// One pose held steadily
pub fn scenario_steady(pose: HandPose, duration: Duration) -> SignLinkResult<ReplayReport> {
    let mut harness = ReplayHarness::assistant()?;
    Ok(harness.run(&FrameScript::default().show(pose, duration)))
}

/// Steady pose through the navigation table and its global cooldown
pub fn scenario_navigation(pose: HandPose, duration: Duration) -> SignLinkResult<ReplayReport> {
    let mut harness = ReplayHarness::navigation()?;
    Ok(harness.run(&FrameScript::default().show(pose, duration)))
}

/// Hold pose shown for `held`, then the hand leaves
pub fn scenario_hold_then_leave(pose: HandPose, held: Duration) -> SignLinkResult<ReplayReport> {
    let mut harness = ReplayHarness::assistant()?;
    let script = FrameScript::default()
        .show(pose, held)
        .absent(Duration::from_secs(1))
        .pause(Duration::from_secs(3));
    Ok(harness.run(&script))
}

/// Pose, hand lost for five frames, same pose again
pub fn scenario_lost_and_found(pose: HandPose, before: Duration, after: Duration) -> SignLinkResult<ReplayReport> {
    let mut harness = ReplayHarness::assistant()?;
    let script = FrameScript::default()
        .show(pose, before)
        .absent_frames(5)
        .show(pose, after);
    Ok(harness.run(&script))
}

/// One pose for `first`, then straight into another for `second`, then no frames
pub fn scenario_switch(from: HandPose, first: Duration, to: HandPose, second: Duration) -> SignLinkResult<ReplayReport> {
    let mut harness = ReplayHarness::assistant()?;
    let script = FrameScript::default()
        .show(from, first)
        .show(to, second)
        .pause(Duration::from_secs(3));
    Ok(harness.run(&script))
}

/// Camera closed mid-hold; the returned report covers the time after teardown
pub fn scenario_teardown_mid_hold(pose: HandPose) -> SignLinkResult<ReplayReport> {
    let mut harness = ReplayHarness::assistant()?;
    harness.run(&FrameScript::default().show(pose, Duration::from_secs(1)));
    harness.stop();

    let after = FrameScript::default()
        .starting_at(harness.now())
        .pause(Duration::from_secs(5));
    Ok(harness.run(&after))
}

/// Steady pose through a noisy detector
pub fn scenario_noisy(pose: HandPose, duration: Duration, noise: NoiseConfig, seed: u64) -> SignLinkResult<ReplayReport> {
    let mut harness = ReplayHarness::assistant()?.with_noise(DetectorNoise::new(noise, seed));
    Ok(harness.run(&FrameScript::default().show(pose, duration)))
}
