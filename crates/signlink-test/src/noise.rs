//! Detector noise injection
//!
//! Simulates an imperfect hand tracker:
//! - Coordinate jitter
//! - Dropped detections (hand briefly lost)
//! - Misclassified frames (another pose for one frame)
//! - Truncated landmark lists

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use signlink_core::HandFrame;

use crate::{FrameInput, HandPose};

/// Noise configuration
#[derive(Clone, Debug)]
pub struct NoiseConfig {
    /// Max coordinate offset
    pub jitter: f32,
    /// Probability a visible hand is reported missing (0.0 - 1.0)
    pub drop_prob: f64,
    /// Probability a visible hand is reported as a different pose
    pub flip_prob: f64,
    /// Probability a visible hand arrives truncated
    pub truncate_prob: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        NoiseConfig {
            jitter: 0.003,
            drop_prob: 0.02,
            flip_prob: 0.02,
            truncate_prob: 0.01,
        }
    }
}

impl NoiseConfig {
    /// Jitter only
    pub fn clean() -> Self {
        NoiseConfig {
            jitter: 0.002,
            drop_prob: 0.0,
            flip_prob: 0.0,
            truncate_prob: 0.0,
        }
    }

    /// Poor lighting, fast motion
    pub fn harsh() -> Self {
        NoiseConfig {
            jitter: 0.004,
            drop_prob: 0.10,
            flip_prob: 0.10,
            truncate_prob: 0.05,
        }
    }
}

/// Statistics for injected noise
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NoiseStats {
    pub frames: u64,
    pub dropped: u64,
    pub flipped: u64,
    pub truncated: u64,
}

/// Seeded noise source; the same seed always yields the same frames
pub struct DetectorNoise {
    config: NoiseConfig,
    rng: StdRng,
    stats: NoiseStats,
}

impl DetectorNoise {
    pub fn new(config: NoiseConfig, seed: u64) -> Self {
        DetectorNoise {
            config,
            rng: StdRng::seed_from_u64(seed),
            stats: NoiseStats::default(),
        }
    }

    /// Degrade one scripted input into what the tracker would report
    pub fn apply(&mut self, input: FrameInput) -> Option<HandFrame> {
        self.stats.frames += 1;

        let pose = match input {
            FrameInput::Pose(pose) => pose,
            other => return other.frame(),
        };

        if self.rng.gen_bool(self.config.drop_prob) {
            self.stats.dropped += 1;
            return None;
        }

        let pose = if self.rng.gen_bool(self.config.flip_prob) {
            self.stats.flipped += 1;
            self.other_pose(pose)
        } else {
            pose
        };

        if self.rng.gen_bool(self.config.truncate_prob) {
            self.stats.truncated += 1;
            let len = self.rng.gen_range(0..signlink_core::HandJoint::COUNT);
            return Some(pose.truncated(len));
        }

        Some(pose.jittered(&mut self.rng, self.config.jitter))
    }

    fn other_pose(&mut self, pose: HandPose) -> HandPose {
        let candidates: Vec<HandPose> = HandPose::all().iter().copied().filter(|&p| p != pose).collect();
        candidates.choose(&mut self.rng).copied().unwrap_or(pose)
    }

    pub fn stats(&self) -> &NoiseStats {
        &self.stats
    }

    pub fn config(&self) -> &NoiseConfig {
        &self.config
    }
}
