//! Engine tuning and gesture-to-action binding tables

use std::time::Duration;

use signlink_core::{GestureLabel, SignLinkError, SignLinkResult};

/// Geometric tie-break thresholds, in normalized image units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifierThresholds {
    /// Minimum thumb tip displacement from its MCP joint for thumbs-up
    pub thumb_extension: f32,
    /// Minimum horizontal index displacement for a point gesture
    pub point_displacement: f32,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            thumb_extension: 0.05,
            point_displacement: 0.05,
        }
    }
}

impl ClassifierThresholds {
    pub fn validate(&self) -> SignLinkResult<()> {
        for (name, value) in [
            ("thumb_extension", self.thumb_extension),
            ("point_displacement", self.point_displacement),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SignLinkError::InvalidThreshold { name, value });
            }
        }
        Ok(())
    }
}

/// Gesture engine configuration
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Stabilization window (K consecutive identical labels)
    pub history_size: usize,
    /// Base debounce; a steady gesture re-confirms after twice this
    pub base_debounce: Duration,
    /// Hold progress tick interval
    pub hold_tick: Duration,
    /// Minimum gap between any two dispatched actions, across gestures
    pub global_cooldown: Option<Duration>,
    pub thresholds: ClassifierThresholds,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            history_size: 5,
            base_debounce: Duration::from_millis(500),
            hold_tick: Duration::from_millis(50),
            global_cooldown: None,
            thresholds: ClassifierThresholds::default(),
        }
    }
}

impl EngineConfig {
    /// Defaults for page-flipping call sites
    pub fn navigation() -> Self {
        EngineConfig {
            global_cooldown: Some(Duration::from_millis(1500)),
            ..Self::default()
        }
    }

    /// Cooldown before a steady gesture is confirmed again
    #[inline]
    pub fn confirmation_cooldown(&self) -> Duration {
        self.base_debounce * 2
    }

    pub fn validate(&self) -> SignLinkResult<()> {
        if self.history_size == 0 {
            return Err(SignLinkError::InvalidHistorySize(self.history_size));
        }
        if self.base_debounce.is_zero() {
            return Err(SignLinkError::InvalidTiming {
                name: "base_debounce",
            });
        }
        if self.hold_tick.is_zero() {
            return Err(SignLinkError::InvalidTiming { name: "hold_tick" });
        }
        if self.global_cooldown.is_some_and(|d| d.is_zero()) {
            return Err(SignLinkError::InvalidTiming {
                name: "global_cooldown",
            });
        }
        self.thresholds.validate()
    }
}

/// Binding of one gesture to its user-facing action
#[derive(Debug, Clone, PartialEq)]
pub struct GestureBinding {
    pub label: GestureLabel,
    pub display_name: String,
    pub emoji: String,
    pub action_name: String,
    /// Zero means the action fires on confirmation
    pub hold: Duration,
}

impl GestureBinding {
    pub fn new(
        label: GestureLabel,
        display_name: impl Into<String>,
        emoji: impl Into<String>,
        action_name: impl Into<String>,
    ) -> Self {
        GestureBinding {
            label,
            display_name: display_name.into(),
            emoji: emoji.into(),
            action_name: action_name.into(),
            hold: Duration::ZERO,
        }
    }

    /// Require the gesture to be held for `seconds`
    pub fn with_hold_secs(mut self, seconds: f64) -> SignLinkResult<Self> {
        self.hold = hold_from_secs(self.label, seconds)?;
        Ok(self)
    }

    #[inline]
    pub fn requires_hold(&self) -> bool {
        !self.hold.is_zero()
    }
}

fn hold_from_secs(gesture: GestureLabel, seconds: f64) -> SignLinkResult<Duration> {
    Duration::try_from_secs_f64(seconds)
        .map_err(|_| SignLinkError::InvalidHoldDuration { gesture, seconds })
}

/// Immutable gesture configuration table
#[derive(Debug, Clone, PartialEq)]
pub struct GestureTable {
    bindings: Vec<GestureBinding>,
}

impl GestureTable {
    /// Build a table, rejecting `none` and duplicate bindings
    pub fn new(bindings: Vec<GestureBinding>) -> SignLinkResult<Self> {
        for (i, binding) in bindings.iter().enumerate() {
            if binding.label.is_none() {
                return Err(SignLinkError::UnbindableGesture(binding.label));
            }
            if bindings[..i].iter().any(|b| b.label == binding.label) {
                return Err(SignLinkError::DuplicateBinding(binding.label));
            }
        }
        Ok(GestureTable { bindings })
    }

    /// Assistant page table: open hand and fist require a 2 s hold
    pub fn assistant() -> Self {
        GestureTable {
            bindings: vec![
                GestureBinding {
                    hold: Duration::from_secs(2),
                    ..GestureBinding::new(GestureLabel::OpenHand, "Main Ouverte", "🖐️", "Assistant")
                },
                GestureBinding {
                    hold: Duration::from_secs(2),
                    ..GestureBinding::new(GestureLabel::ClosedFist, "Poing Fermé", "✊", "Annuler")
                },
                GestureBinding::new(GestureLabel::PointRight, "Pointer Droite", "👉", "Suivant"),
                GestureBinding::new(GestureLabel::PointLeft, "Pointer Gauche", "👈", "Précédent"),
                GestureBinding::new(GestureLabel::ThumbsUp, "Pouce Levé", "👍", "Confirmer"),
            ],
        }
    }

    /// Global navigation table: every action is immediate
    pub fn navigation() -> Self {
        GestureTable {
            bindings: vec![
                GestureBinding::new(GestureLabel::PointRight, "Pointer Droite", "👉", "Suivant"),
                GestureBinding::new(GestureLabel::PointLeft, "Pointer Gauche", "👈", "Précédent"),
                GestureBinding::new(GestureLabel::OpenHand, "Main Ouverte", "🖐️", "Voix ON"),
                GestureBinding::new(GestureLabel::ClosedFist, "Poing Fermé", "✊", "Voix OFF"),
                GestureBinding::new(GestureLabel::ThumbsUp, "Pouce Levé", "👍", "OK"),
            ],
        }
    }

    pub fn get(&self, label: GestureLabel) -> Option<&GestureBinding> {
        self.bindings.iter().find(|b| b.label == label)
    }

    pub fn bindings(&self) -> &[GestureBinding] {
        &self.bindings
    }

    /// Hold duration for a gesture, zero when unbound or immediate
    pub fn hold_for(&self, label: GestureLabel) -> Duration {
        self.get(label).map(|b| b.hold).unwrap_or(Duration::ZERO)
    }

    /// Copy of the table with one gesture's hold replaced
    pub fn with_hold_secs(&self, label: GestureLabel, seconds: f64) -> SignLinkResult<Self> {
        let hold = hold_from_secs(label, seconds)?;
        let mut bindings = self.bindings.clone();
        let binding = bindings
            .iter_mut()
            .find(|b| b.label == label)
            .ok_or_else(|| SignLinkError::UnknownGesture(label.to_string()))?;
        binding.hold = hold;
        Ok(GestureTable { bindings })
    }
}

impl Default for GestureTable {
    fn default() -> Self {
        Self::assistant()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.history_size, 5);
        assert_eq!(config.confirmation_cooldown(), Duration::from_millis(1000));
        assert!(config.global_cooldown.is_none());
    }

    #[test]
    fn test_navigation_config() {
        let config = EngineConfig::navigation();
        assert_eq!(config.global_cooldown, Some(Duration::from_millis(1500)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config() {
        let config = EngineConfig {
            history_size: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SignLinkError::InvalidHistorySize(0))
        ));

        let config = EngineConfig {
            hold_tick: Duration::ZERO,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SignLinkError::InvalidTiming { name: "hold_tick" })
        ));

        let config = EngineConfig {
            thresholds: ClassifierThresholds {
                thumb_extension: f32::NAN,
                ..ClassifierThresholds::default()
            },
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SignLinkError::InvalidThreshold { name: "thumb_extension", .. })
        ));
    }

    #[test]
    fn test_assistant_table_holds() {
        let table = GestureTable::assistant();
        assert_eq!(table.hold_for(GestureLabel::OpenHand), Duration::from_secs(2));
        assert_eq!(table.hold_for(GestureLabel::ClosedFist), Duration::from_secs(2));
        assert_eq!(table.hold_for(GestureLabel::PointRight), Duration::ZERO);
        assert_eq!(table.hold_for(GestureLabel::None), Duration::ZERO);
        assert_eq!(table.get(GestureLabel::OpenHand).unwrap().action_name, "Assistant");
    }

    #[test]
    fn test_navigation_table_is_immediate() {
        let table = GestureTable::navigation();
        assert!(table.bindings().iter().all(|b| !b.requires_hold()));
        assert_eq!(table.get(GestureLabel::ClosedFist).unwrap().action_name, "Voix OFF");
    }

    #[test]
    fn test_table_rejects_duplicates_and_none() {
        let dup = GestureTable::new(vec![
            GestureBinding::new(GestureLabel::ThumbsUp, "a", "", "x"),
            GestureBinding::new(GestureLabel::ThumbsUp, "b", "", "y"),
        ]);
        assert!(matches!(dup, Err(SignLinkError::DuplicateBinding(GestureLabel::ThumbsUp))));

        let none = GestureTable::new(vec![GestureBinding::new(GestureLabel::None, "", "", "")]);
        assert!(matches!(none, Err(SignLinkError::UnbindableGesture(_))));
    }

    #[test]
    fn test_hold_override() {
        let table = GestureTable::navigation()
            .with_hold_secs(GestureLabel::ThumbsUp, 1.5)
            .unwrap();
        assert_eq!(table.hold_for(GestureLabel::ThumbsUp), Duration::from_millis(1500));

        let err = table.with_hold_secs(GestureLabel::ThumbsUp, -1.0).unwrap_err();
        assert!(matches!(err, SignLinkError::InvalidHoldDuration { .. }));

        let binding = GestureBinding::new(GestureLabel::OpenHand, "", "", "")
            .with_hold_secs(f64::INFINITY);
        assert!(binding.is_err());
    }
}
