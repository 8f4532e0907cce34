//! Landmark Classifier - one hand frame to one gesture label
//!
//! Pure geometry on image-space landmarks. Y grows downward, so a finger
//! is "extended" when its tip sits above its PIP joint. The camera feed is
//! shown mirrored, so left/right labels follow the user-facing view rather
//! than raw coordinates.

use signlink_core::{Finger, GestureLabel, HandFrame, HandJoint, Landmark};
use tracing::trace;

use crate::ClassifierThresholds;

/// Which hand the detector saw, judged from thumb and pinky placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
}

/// Extended (true) or curled (false), per finger
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FingerStates {
    pub thumb: bool,
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

impl FingerStates {
    /// Derive finger states; `None` for incomplete frames
    pub fn from_frame(frame: &HandFrame) -> Option<Self> {
        let hand = CompleteHand::new(frame)?;
        Some(hand.finger_states())
    }

    /// Extended count among index, middle, ring and pinky
    pub fn extended_count(&self) -> usize {
        [self.index, self.middle, self.ring, self.pinky]
            .iter()
            .filter(|&&extended| extended)
            .count()
    }

    /// Index, middle, ring and pinky all curled; thumb ignored
    pub fn fingers_curled(&self) -> bool {
        !self.index && !self.middle && !self.ring && !self.pinky
    }

    /// Only the index finger is extended; thumb ignored
    pub fn only_index(&self) -> bool {
        self.index && !self.middle && !self.ring && !self.pinky
    }
}

/// A frame known to carry all 21 joints
struct CompleteHand<'a> {
    points: &'a [Landmark],
}

impl<'a> CompleteHand<'a> {
    fn new(frame: &'a HandFrame) -> Option<Self> {
        frame.is_complete().then(|| CompleteHand {
            points: frame.landmarks(),
        })
    }

    #[inline]
    fn at(&self, joint: HandJoint) -> Landmark {
        self.points[joint.index()]
    }

    fn handedness(&self) -> Handedness {
        if self.at(HandJoint::ThumbTip).x < self.at(HandJoint::PinkyTip).x {
            Handedness::Right
        } else {
            Handedness::Left
        }
    }

    fn finger_extended(&self, finger: Finger) -> bool {
        self.at(finger.tip()).y < self.at(finger.pip()).y
    }

    /// Thumb tip further from the palm than the IP joint, along X
    fn thumb_extended(&self) -> bool {
        let tip = self.at(HandJoint::ThumbTip);
        let ip = self.at(HandJoint::ThumbIp);
        match self.handedness() {
            Handedness::Right => tip.x < ip.x,
            Handedness::Left => tip.x > ip.x,
        }
    }

    fn finger_states(&self) -> FingerStates {
        FingerStates {
            thumb: self.thumb_extended(),
            index: self.finger_extended(Finger::Index),
            middle: self.finger_extended(Finger::Middle),
            ring: self.finger_extended(Finger::Ring),
            pinky: self.finger_extended(Finger::Pinky),
        }
    }
}

/// Stateless gesture classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct GestureClassifier {
    thresholds: ClassifierThresholds,
}

impl GestureClassifier {
    pub fn new(thresholds: ClassifierThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ClassifierThresholds {
        &self.thresholds
    }

    /// Classify one frame. Missing or short frames are `None`.
    pub fn classify(&self, frame: Option<&HandFrame>) -> GestureLabel {
        let Some(hand) = frame.and_then(CompleteHand::new) else {
            return GestureLabel::None;
        };

        let label = self.classify_hand(&hand);
        trace!(gesture = %label, "frame classified");
        label
    }

    fn classify_hand(&self, hand: &CompleteHand<'_>) -> GestureLabel {
        let fingers = hand.finger_states();
        let index_mcp = hand.at(HandJoint::IndexMcp);

        if fingers.extended_count() >= 4 && fingers.index && fingers.middle && fingers.ring {
            return GestureLabel::OpenHand;
        }

        if fingers.fingers_curled() {
            let thumb_tip = hand.at(HandJoint::ThumbTip);
            let thumb_mcp = hand.at(HandJoint::ThumbMcp);
            let threshold = self.thresholds.thumb_extension;

            let thumb_up = thumb_tip.y < index_mcp.y;
            let thumb_out = (thumb_tip.x - thumb_mcp.x).abs() > threshold
                || (thumb_tip.y - thumb_mcp.y).abs() > threshold;

            return if thumb_up && thumb_out {
                GestureLabel::ThumbsUp
            } else {
                GestureLabel::ClosedFist
            };
        }

        if fingers.only_index() {
            let index_tip = hand.at(HandJoint::IndexTip);
            let dx = index_tip.x - index_mcp.x;
            let dy = (index_tip.y - index_mcp.y).abs();
            let threshold = self.thresholds.point_displacement;

            if dx.abs() > dy {
                // Mirrored view: raw +x reads as the user's left
                if dx > threshold {
                    return GestureLabel::PointLeft;
                }
                if dx < -threshold {
                    return GestureLabel::PointRight;
                }
            }
        }

        GestureLabel::None
    }
}

/// Classify with default thresholds
pub fn classify(frame: Option<&HandFrame>) -> GestureLabel {
    GestureClassifier::default().classify(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EXTENDED: [(f32, f32); 4] = [(0.0, 0.60), (0.0, 0.50), (0.0, 0.42), (0.0, 0.35)];
    const CURLED: [(f32, f32); 4] = [(0.0, 0.60), (0.0, 0.55), (0.0, 0.62), (0.0, 0.65)];

    /// Right hand facing the camera; `extended` per index/middle/ring/pinky
    fn hand(extended: [bool; 4], thumb: [(f32, f32); 4]) -> Vec<Landmark> {
        let mut points = vec![Landmark::xy(0.5, 0.9)];
        points.extend(thumb.iter().map(|&(x, y)| Landmark::xy(x, y)));
        for (i, &ext) in extended.iter().enumerate() {
            let column = 0.42 + 0.07 * i as f32;
            let shape = if ext { EXTENDED } else { CURLED };
            points.extend(shape.iter().map(|&(dx, y)| Landmark::xy(column + dx, y)));
        }
        points
    }

    const THUMB_OUT: [(f32, f32); 4] = [(0.42, 0.85), (0.37, 0.78), (0.33, 0.72), (0.30, 0.66)];
    const THUMB_TUCKED: [(f32, f32); 4] = [(0.42, 0.85), (0.40, 0.74), (0.43, 0.70), (0.45, 0.66)];
    const THUMB_RAISED: [(f32, f32); 4] = [(0.42, 0.80), (0.40, 0.62), (0.39, 0.48), (0.38, 0.35)];

    fn frame(points: Vec<Landmark>) -> HandFrame {
        HandFrame::new(points)
    }

    fn pointing(tip_x: f32, pip_x: f32, dip_x: f32) -> HandFrame {
        let mut points = hand([false, false, false, false], THUMB_TUCKED);
        points[5] = Landmark::xy(0.45, 0.60);
        points[6] = Landmark::xy(pip_x, 0.58);
        points[7] = Landmark::xy(dip_x, 0.575);
        points[8] = Landmark::xy(tip_x, 0.57);
        frame(points)
    }

    #[test]
    fn test_missing_and_short_frames() {
        assert_eq!(classify(None), GestureLabel::None);

        let mut points = hand([true; 4], THUMB_OUT);
        points.truncate(20);
        assert_eq!(classify(Some(&frame(points))), GestureLabel::None);
        assert_eq!(classify(Some(&HandFrame::default())), GestureLabel::None);
    }

    #[test]
    fn test_open_hand() {
        let f = frame(hand([true; 4], THUMB_OUT));
        assert_eq!(classify(Some(&f)), GestureLabel::OpenHand);

        let states = FingerStates::from_frame(&f).unwrap();
        assert!(states.thumb);
        assert_eq!(states.extended_count(), 4);
    }

    #[test]
    fn test_three_fingers_is_not_open_hand() {
        let f = frame(hand([true, true, true, false], THUMB_OUT));
        assert_eq!(classify(Some(&f)), GestureLabel::None);
    }

    #[test]
    fn test_closed_fist_and_thumbs_up() {
        let fist = frame(hand([false; 4], THUMB_TUCKED));
        assert_eq!(classify(Some(&fist)), GestureLabel::ClosedFist);

        let thumbs_up = frame(hand([false; 4], THUMB_RAISED));
        assert_eq!(classify(Some(&thumbs_up)), GestureLabel::ThumbsUp);
    }

    #[test]
    fn test_thumb_above_knuckle_but_not_displaced() {
        // Tip above the index MCP but within 0.05 of the thumb MCP
        let thumb = [(0.42, 0.80), (0.40, 0.62), (0.41, 0.60), (0.42, 0.59)];
        let f = frame(hand([false; 4], thumb));
        assert_eq!(classify(Some(&f)), GestureLabel::ClosedFist);
    }

    #[test]
    fn test_pointing_directions() {
        assert_eq!(classify(Some(&pointing(0.70, 0.55, 0.62))), GestureLabel::PointLeft);
        assert_eq!(classify(Some(&pointing(0.20, 0.35, 0.28))), GestureLabel::PointRight);
    }

    #[test]
    fn test_pointing_up_is_none() {
        let f = frame(hand([true, false, false, false], THUMB_TUCKED));
        assert_eq!(classify(Some(&f)), GestureLabel::None);
    }

    #[test]
    fn test_small_horizontal_point_is_none() {
        // Horizontal but under the displacement threshold
        assert_eq!(classify(Some(&pointing(0.49, 0.46, 0.47))), GestureLabel::None);
    }

    #[test]
    fn test_two_fingers_is_none() {
        let f = frame(hand([true, true, false, false], THUMB_TUCKED));
        assert_eq!(classify(Some(&f)), GestureLabel::None);
    }

    #[test]
    fn test_left_hand_thumb() {
        // Mirror a right hand around x = 0.5
        let mirrored: Vec<Landmark> = hand([true; 4], THUMB_OUT)
            .into_iter()
            .map(|p| Landmark::xy(1.0 - p.x, p.y))
            .collect();
        let states = FingerStates::from_frame(&frame(mirrored)).unwrap();
        assert!(states.thumb);
    }

    #[test]
    fn test_custom_thresholds() {
        let strict = GestureClassifier::new(ClassifierThresholds {
            point_displacement: 0.5,
            ..ClassifierThresholds::default()
        });
        assert_eq!(strict.classify(Some(&pointing(0.70, 0.55, 0.62))), GestureLabel::None);
    }

    proptest! {
        #[test]
        fn prop_classify_is_deterministic(
            points in prop::collection::vec((0.0f32..1.0, 0.0f32..1.0, -1.0f32..1.0), 0..30)
        ) {
            let f = HandFrame::from_points(&points);
            let first = classify(Some(&f));
            prop_assert_eq!(first, classify(Some(&f)));
            if points.len() < HandJoint::COUNT {
                prop_assert_eq!(first, GestureLabel::None);
            }
        }

        #[test]
        fn prop_classify_never_panics_on_any_float(
            points in prop::collection::vec(
                (any::<f32>(), any::<f32>(), any::<f32>()),
                HandJoint::COUNT..=HandJoint::COUNT
            )
        ) {
            let _ = classify(Some(&HandFrame::from_points(&points)));
        }
    }
}
