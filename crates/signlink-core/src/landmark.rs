//! Hand landmarks - 21 tracked points per detected hand
//!
//! Coordinates are normalized image coordinates as delivered by the pose
//! detector: `x` and `y` in `[0, 1]` relative to frame width and height,
//! `y` growing downward. `z` is relative depth and is carried but unused
//! by classification.

/// Anatomical joint index for a hand landmark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandJoint {
    Wrist = 0,

    // Thumb
    ThumbCmc = 1,
    ThumbMcp = 2,
    ThumbIp = 3,
    ThumbTip = 4,

    // Index finger
    IndexMcp = 5,
    IndexPip = 6,
    IndexDip = 7,
    IndexTip = 8,

    // Middle finger
    MiddleMcp = 9,
    MiddlePip = 10,
    MiddleDip = 11,
    MiddleTip = 12,

    // Ring finger
    RingMcp = 13,
    RingPip = 14,
    RingDip = 15,
    RingTip = 16,

    // Pinky
    PinkyMcp = 17,
    PinkyPip = 18,
    PinkyDip = 19,
    PinkyTip = 20,
}

impl HandJoint {
    /// Number of landmarks in a complete hand frame
    pub const COUNT: usize = 21;

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Non-thumb finger, for tip/pip lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub fn all() -> &'static [Finger] {
        &[Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky]
    }

    pub fn tip(self) -> HandJoint {
        match self {
            Finger::Index => HandJoint::IndexTip,
            Finger::Middle => HandJoint::MiddleTip,
            Finger::Ring => HandJoint::RingTip,
            Finger::Pinky => HandJoint::PinkyTip,
        }
    }

    pub fn pip(self) -> HandJoint {
        match self {
            Finger::Index => HandJoint::IndexPip,
            Finger::Middle => HandJoint::MiddlePip,
            Finger::Ring => HandJoint::RingPip,
            Finger::Pinky => HandJoint::PinkyPip,
        }
    }
}

/// Single tracked point
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Planar point with zero depth
    pub fn xy(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }
}

/// One detected hand as delivered by the detector
///
/// A frame may carry fewer than 21 points when the detector output is
/// truncated; such frames are kept as-is and classify as no gesture.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandFrame {
    landmarks: Vec<Landmark>,
}

impl HandFrame {
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self { landmarks }
    }

    /// Build a frame from raw `(x, y, z)` triples
    pub fn from_points(points: &[(f32, f32, f32)]) -> Self {
        Self {
            landmarks: points
                .iter()
                .map(|&(x, y, z)| Landmark::new(x, y, z))
                .collect(),
        }
    }

    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    /// True when every joint of the anatomical scheme is present
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.landmarks.len() >= HandJoint::COUNT
    }

    /// Get a landmark by joint
    #[inline]
    pub fn joint(&self, joint: HandJoint) -> Option<&Landmark> {
        self.landmarks.get(joint.index())
    }
}

impl From<[Landmark; HandJoint::COUNT]> for HandFrame {
    fn from(landmarks: [Landmark; HandJoint::COUNT]) -> Self {
        Self {
            landmarks: landmarks.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joint_indices() {
        assert_eq!(HandJoint::Wrist.index(), 0);
        assert_eq!(HandJoint::ThumbTip.index(), 4);
        assert_eq!(HandJoint::IndexMcp.index(), 5);
        assert_eq!(HandJoint::IndexPip.index(), 6);
        assert_eq!(HandJoint::IndexTip.index(), 8);
        assert_eq!(HandJoint::MiddlePip.index(), 10);
        assert_eq!(HandJoint::RingTip.index(), 16);
        assert_eq!(HandJoint::PinkyPip.index(), 18);
        assert_eq!(HandJoint::PinkyTip.index(), 20);
    }

    #[test]
    fn test_short_frame_is_incomplete() {
        let frame = HandFrame::new(vec![Landmark::default(); 20]);
        assert!(!frame.is_complete());
        assert!(frame.joint(HandJoint::PinkyTip).is_none());

        let frame = HandFrame::from([Landmark::default(); HandJoint::COUNT]);
        assert!(frame.is_complete());
        assert!(frame.joint(HandJoint::PinkyTip).is_some());
    }

    #[test]
    fn test_finger_lookup() {
        for finger in Finger::all() {
            assert_eq!(finger.tip().index(), finger.pip().index() + 2);
        }
    }
}
