//! Gesture vocabulary
//!
//! The closed set of labels the classifier may produce for a frame.

use std::fmt;
use std::str::FromStr;

use crate::SignLinkError;

/// Gesture label produced per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GestureLabel {
    /// No confident gesture (also: no hand)
    #[default]
    None,
    /// Index, middle, ring and pinky extended
    OpenHand,
    /// All four fingers curled, thumb tucked
    ClosedFist,
    /// Index pointing left in the mirrored view
    PointLeft,
    /// Index pointing right in the mirrored view
    PointRight,
    /// All four fingers curled, thumb raised
    ThumbsUp,
}

impl GestureLabel {
    /// All labels in order, `None` first
    pub fn all() -> &'static [GestureLabel] {
        &[
            GestureLabel::None,
            GestureLabel::OpenHand,
            GestureLabel::ClosedFist,
            GestureLabel::PointLeft,
            GestureLabel::PointRight,
            GestureLabel::ThumbsUp,
        ]
    }

    /// Labels that can be bound to an action
    pub fn actionable() -> &'static [GestureLabel] {
        &Self::all()[1..]
    }

    #[inline]
    pub fn is_none(self) -> bool {
        self == GestureLabel::None
    }

    /// Stable snake_case name
    pub fn as_str(self) -> &'static str {
        match self {
            GestureLabel::None => "none",
            GestureLabel::OpenHand => "open_hand",
            GestureLabel::ClosedFist => "closed_fist",
            GestureLabel::PointLeft => "point_left",
            GestureLabel::PointRight => "point_right",
            GestureLabel::ThumbsUp => "thumbs_up",
        }
    }
}

impl fmt::Display for GestureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GestureLabel {
    type Err = SignLinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GestureLabel::all()
            .iter()
            .copied()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| SignLinkError::UnknownGesture(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_names_parse_back() {
        for label in GestureLabel::all() {
            assert_eq!(label.as_str().parse::<GestureLabel>().unwrap(), *label);
        }
    }

    #[test]
    fn test_unknown_label() {
        let err = "victory".parse::<GestureLabel>().unwrap_err();
        assert!(matches!(err, SignLinkError::UnknownGesture(name) if name == "victory"));
    }

    #[test]
    fn test_actionable_excludes_none() {
        assert_eq!(GestureLabel::actionable().len(), 5);
        assert!(!GestureLabel::actionable().contains(&GestureLabel::None));
    }
}
