//! Canonical synthetic hand poses
//!
//! Right hand facing the camera in normalized image space (y grows
//! downward). Finger columns sit left to right from index to pinky with the
//! thumb on the far left. Every pose keeps a wide margin around the
//! classifier thresholds so small jitter never changes its label.

use rand::Rng;
use signlink_core::{GestureLabel, HandFrame, HandJoint, Landmark};

const WRIST: (f32, f32) = (0.5, 0.9);

/// MCP, PIP, DIP, TIP heights
const EXTENDED: [f32; 4] = [0.60, 0.50, 0.42, 0.35];
const CURLED: [f32; 4] = [0.60, 0.55, 0.62, 0.65];

const THUMB_OUT: [(f32, f32); 4] = [(0.42, 0.85), (0.37, 0.78), (0.33, 0.72), (0.30, 0.66)];
const THUMB_TUCKED: [(f32, f32); 4] = [(0.42, 0.85), (0.40, 0.74), (0.43, 0.70), (0.45, 0.66)];
const THUMB_RAISED: [(f32, f32); 4] = [(0.42, 0.80), (0.40, 0.62), (0.39, 0.48), (0.38, 0.35)];

/// Horizontal index finger: MCP, PIP, DIP, TIP
const INDEX_TOWARD_PLUS_X: [(f32, f32); 4] = [(0.45, 0.60), (0.55, 0.59), (0.62, 0.575), (0.70, 0.56)];
const INDEX_TOWARD_MINUS_X: [(f32, f32); 4] = [(0.45, 0.60), (0.35, 0.59), (0.28, 0.575), (0.20, 0.56)];

/// Synthetic poses, including two the classifier maps to `none`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandPose {
    OpenHand,
    ClosedFist,
    ThumbsUp,
    PointLeft,
    PointRight,
    /// Index and middle extended
    Peace,
    /// Index extended straight up
    PointUp,
}

impl HandPose {
    pub fn all() -> &'static [HandPose] {
        &[
            HandPose::OpenHand,
            HandPose::ClosedFist,
            HandPose::ThumbsUp,
            HandPose::PointLeft,
            HandPose::PointRight,
            HandPose::Peace,
            HandPose::PointUp,
        ]
    }

    /// Label the default classifier assigns to this pose
    pub fn expected(self) -> GestureLabel {
        match self {
            HandPose::OpenHand => GestureLabel::OpenHand,
            HandPose::ClosedFist => GestureLabel::ClosedFist,
            HandPose::ThumbsUp => GestureLabel::ThumbsUp,
            HandPose::PointLeft => GestureLabel::PointLeft,
            HandPose::PointRight => GestureLabel::PointRight,
            HandPose::Peace | HandPose::PointUp => GestureLabel::None,
        }
    }

    /// Pose producing `label`, if any
    pub fn for_label(label: GestureLabel) -> Option<HandPose> {
        HandPose::all()
            .iter()
            .copied()
            .find(|pose| !label.is_none() && pose.expected() == label)
    }

    pub fn landmarks(self) -> Vec<Landmark> {
        let (thumb, extended) = match self {
            HandPose::OpenHand => (THUMB_OUT, [true; 4]),
            HandPose::ClosedFist => (THUMB_TUCKED, [false; 4]),
            HandPose::ThumbsUp => (THUMB_RAISED, [false; 4]),
            HandPose::PointLeft | HandPose::PointRight => (THUMB_TUCKED, [false; 4]),
            HandPose::Peace => (THUMB_TUCKED, [true, true, false, false]),
            HandPose::PointUp => (THUMB_TUCKED, [true, false, false, false]),
        };

        let mut points = Vec::with_capacity(HandJoint::COUNT);
        points.push(Landmark::xy(WRIST.0, WRIST.1));
        points.extend(thumb.iter().map(|&(x, y)| Landmark::xy(x, y)));
        for (i, &up) in extended.iter().enumerate() {
            let column = 0.42 + 0.07 * i as f32;
            let heights = if up { EXTENDED } else { CURLED };
            points.extend(heights.iter().map(|&y| Landmark::xy(column, y)));
        }

        // Mirrored view: raw +x is the user's left
        let index = match self {
            HandPose::PointLeft => Some(INDEX_TOWARD_PLUS_X),
            HandPose::PointRight => Some(INDEX_TOWARD_MINUS_X),
            _ => None,
        };
        if let Some(joints) = index {
            let first = HandJoint::IndexMcp.index();
            for (offset, &(x, y)) in joints.iter().enumerate() {
                points[first + offset] = Landmark::xy(x, y);
            }
        }

        points
    }

    pub fn frame(self) -> HandFrame {
        HandFrame::new(self.landmarks())
    }

    /// Same pose with every coordinate nudged by up to `amplitude`
    pub fn jittered<R: Rng>(self, rng: &mut R, amplitude: f32) -> HandFrame {
        let mut points = self.landmarks();
        if amplitude > 0.0 {
            for p in &mut points {
                p.x += rng.gen_range(-amplitude..=amplitude);
                p.y += rng.gen_range(-amplitude..=amplitude);
            }
        }
        HandFrame::new(points)
    }

    /// Pose with only the first `len` landmarks, as a glitching detector sends
    pub fn truncated(self, len: usize) -> HandFrame {
        let mut points = self.landmarks();
        points.truncate(len);
        HandFrame::new(points)
    }
}
