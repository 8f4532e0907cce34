//! Timed frame scripts
//!
//! A script is the sequence of detector callbacks a camera session would
//! produce: one entry per frame, spaced at the frame interval. `pause`
//! leaves a gap with no callbacks at all.

use std::time::Duration;

use signlink_core::{FrameTime, HandFrame};

use crate::HandPose;

/// ~30 fps
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Landmarks kept in a malformed frame
const MALFORMED_LEN: usize = 12;

/// What the detector reported for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameInput {
    Pose(HandPose),
    /// Detector ran and found no hand
    Absent,
    /// Hand reported with too few landmarks
    Malformed(HandPose),
}

impl FrameInput {
    pub fn frame(self) -> Option<HandFrame> {
        match self {
            FrameInput::Pose(pose) => Some(pose.frame()),
            FrameInput::Absent => None,
            FrameInput::Malformed(pose) => Some(pose.truncated(MALFORMED_LEN)),
        }
    }

    pub fn pose(self) -> Option<HandPose> {
        match self {
            FrameInput::Pose(pose) => Some(pose),
            _ => None,
        }
    }
}

/// One detector callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptedFrame {
    pub at: FrameTime,
    pub input: FrameInput,
}

/// Builder for a timed sequence of frames
#[derive(Debug, Clone)]
pub struct FrameScript {
    interval: Duration,
    frames: Vec<ScriptedFrame>,
    cursor: FrameTime,
}

impl Default for FrameScript {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_INTERVAL)
    }
}

impl FrameScript {
    pub fn new(interval: Duration) -> Self {
        FrameScript {
            interval,
            frames: Vec::new(),
            cursor: FrameTime::ZERO,
        }
    }

    /// Start the script at a later session time
    pub fn starting_at(mut self, at: FrameTime) -> Self {
        self.cursor = at;
        self
    }

    fn push(mut self, input: FrameInput, count: usize) -> Self {
        for _ in 0..count {
            self.frames.push(ScriptedFrame {
                at: self.cursor,
                input,
            });
            self.cursor = self.cursor + self.interval;
        }
        self
    }

    fn frames_for(&self, duration: Duration) -> usize {
        let interval = self.interval.as_micros().max(1);
        duration.as_micros().div_ceil(interval) as usize
    }

    /// `count` consecutive frames of a pose
    pub fn show_frames(self, pose: HandPose, count: usize) -> Self {
        self.push(FrameInput::Pose(pose), count)
    }

    /// Keep a pose in view for at least `duration`
    pub fn show(self, pose: HandPose, duration: Duration) -> Self {
        let count = self.frames_for(duration);
        self.show_frames(pose, count)
    }

    pub fn absent_frames(self, count: usize) -> Self {
        self.push(FrameInput::Absent, count)
    }

    /// No hand in view for at least `duration`
    pub fn absent(self, duration: Duration) -> Self {
        let count = self.frames_for(duration);
        self.absent_frames(count)
    }

    pub fn malformed(self, pose: HandPose, count: usize) -> Self {
        self.push(FrameInput::Malformed(pose), count)
    }

    /// Detector silent for `duration`
    pub fn pause(mut self, duration: Duration) -> Self {
        self.cursor = self.cursor + duration;
        self
    }

    /// Poses in order, one frame each
    pub fn sequence(self, poses: &[HandPose]) -> Self {
        poses.iter().fold(self, |script, &pose| script.show_frames(pose, 1))
    }

    pub fn frames(&self) -> &[ScriptedFrame] {
        &self.frames
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Session time just after the last scripted event
    pub fn end(&self) -> FrameTime {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
