//! Gesture controls - turns dispatched actions into app commands
//!
//! `GestureControls` is a sink-side helper: it tracks the current page,
//! voice and camera state and says what the app should do next. It never
//! performs the command itself.

use signlink_core::GestureLabel;
use signlink_gesture::{ActionTrigger, GestureAction};

use crate::Profile;

/// Navigable pages in cycle order, with their spoken names
pub const PAGES: [(&str, &str); 5] = [
    ("/", "Accueil"),
    ("/banking", "Banque"),
    ("/shopping", "Shopping"),
    ("/translate", "Traduction"),
    ("/accessibility", "Accessibilité"),
];

/// Position in the page cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageCycle {
    current: Option<usize>,
}

impl PageCycle {
    /// Start on a path; unknown paths have no position
    pub fn at(path: &str) -> Self {
        PageCycle {
            current: PAGES.iter().position(|(p, _)| *p == path),
        }
    }

    pub fn current(&self) -> Option<(&'static str, &'static str)> {
        self.current.map(|i| PAGES[i])
    }

    pub fn set_path(&mut self, path: &str) {
        *self = Self::at(path);
    }

    pub fn next(&mut self) -> (&'static str, &'static str) {
        let index = match self.current {
            Some(i) => (i + 1) % PAGES.len(),
            None => 0,
        };
        self.current = Some(index);
        PAGES[index]
    }

    pub fn prev(&mut self) -> (&'static str, &'static str) {
        let index = match self.current {
            Some(i) => (i + PAGES.len() - 1) % PAGES.len(),
            None => 0,
        };
        self.current = Some(index);
        PAGES[index]
    }
}

/// What the app should do in response to an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlCommand {
    /// Route to a page; speak its name when `announce` is set
    Navigate {
        path: &'static str,
        name: &'static str,
        announce: bool,
    },
    /// Switch speech output, always announced
    Voice {
        enabled: bool,
        announcement: &'static str,
    },
    /// Switch the camera feed
    Camera { enabled: bool },
    /// Speak a short confirmation
    Speak(String),
}

/// Page, voice and camera state driven by gesture actions
#[derive(Debug, Clone)]
pub struct GestureControls {
    profile: Profile,
    pages: PageCycle,
    voice_enabled: bool,
    camera_enabled: bool,
}

impl GestureControls {
    pub fn for_profile(profile: Profile) -> Self {
        GestureControls {
            profile,
            pages: PageCycle::at("/"),
            voice_enabled: true,
            camera_enabled: true,
        }
    }

    /// Sync with a route change made outside gestures
    pub fn set_path(&mut self, path: &str) {
        self.pages.set_path(path);
    }

    pub fn current_page(&self) -> Option<(&'static str, &'static str)> {
        self.pages.current()
    }

    pub fn voice_enabled(&self) -> bool {
        self.voice_enabled
    }

    pub fn camera_enabled(&self) -> bool {
        self.camera_enabled
    }

    /// Update state for one dispatched action
    pub fn apply(&mut self, action: &GestureAction) -> Option<ControlCommand> {
        match (action.gesture, action.trigger) {
            (GestureLabel::PointRight, ActionTrigger::Confirmed) => {
                let page = self.pages.next();
                Some(self.navigate(page))
            }
            (GestureLabel::PointLeft, ActionTrigger::Confirmed) => {
                let page = self.pages.prev();
                Some(self.navigate(page))
            }
            (GestureLabel::ThumbsUp, ActionTrigger::Confirmed) => self
                .voice_enabled
                .then(|| ControlCommand::Speak(action.action_name.clone())),
            (gesture, trigger) => match self.profile {
                Profile::Navigation => self.apply_navigation(gesture),
                Profile::Assistant => self.apply_assistant(action, gesture, trigger),
            },
        }
    }

    fn apply_navigation(&mut self, gesture: GestureLabel) -> Option<ControlCommand> {
        match gesture {
            GestureLabel::ClosedFist => Some(self.set_voice(false)),
            GestureLabel::OpenHand => Some(self.set_voice(true)),
            _ => None,
        }
    }

    fn apply_assistant(
        &mut self,
        action: &GestureAction,
        gesture: GestureLabel,
        trigger: ActionTrigger,
    ) -> Option<ControlCommand> {
        match (gesture, trigger) {
            // Hold started; tell the user what will happen
            (GestureLabel::OpenHand | GestureLabel::ClosedFist, ActionTrigger::Confirmed) => self
                .voice_enabled
                .then(|| ControlCommand::Speak(action.display_name.clone())),
            (GestureLabel::ClosedFist, ActionTrigger::HoldCompleted) => {
                let enabled = !self.voice_enabled;
                Some(self.set_voice(enabled))
            }
            (GestureLabel::OpenHand, ActionTrigger::HoldCompleted) => {
                self.camera_enabled = !self.camera_enabled;
                Some(ControlCommand::Camera {
                    enabled: self.camera_enabled,
                })
            }
            _ => None,
        }
    }

    fn navigate(&self, (path, name): (&'static str, &'static str)) -> ControlCommand {
        ControlCommand::Navigate {
            path,
            name,
            announce: self.voice_enabled,
        }
    }

    fn set_voice(&mut self, enabled: bool) -> ControlCommand {
        self.voice_enabled = enabled;
        ControlCommand::Voice {
            enabled,
            announcement: if enabled { "Voix activée" } else { "Voix désactivée" },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signlink_core::FrameTime;
    use signlink_gesture::GestureTable;

    fn action(table: &GestureTable, gesture: GestureLabel, trigger: ActionTrigger) -> GestureAction {
        let binding = table.get(gesture).unwrap();
        GestureAction::from_binding(binding, trigger, FrameTime::ZERO)
    }

    #[test]
    fn test_page_cycle_wraps() {
        let mut pages = PageCycle::at("/accessibility");
        assert_eq!(pages.next(), ("/", "Accueil"));
        assert_eq!(pages.prev(), ("/accessibility", "Accessibilité"));
        assert_eq!(pages.prev(), ("/translate", "Traduction"));
    }

    #[test]
    fn test_unknown_page_goes_to_first() {
        let mut pages = PageCycle::at("/settings");
        assert_eq!(pages.current(), None);
        assert_eq!(pages.prev(), ("/", "Accueil"));

        let mut pages = PageCycle::at("/settings");
        assert_eq!(pages.next(), ("/", "Accueil"));
    }

    #[test]
    fn test_navigation_profile() {
        let table = GestureTable::navigation();
        let mut controls = GestureControls::for_profile(Profile::Navigation);

        let cmd = controls.apply(&action(&table, GestureLabel::PointRight, ActionTrigger::Confirmed));
        assert_eq!(
            cmd,
            Some(ControlCommand::Navigate {
                path: "/banking",
                name: "Banque",
                announce: true
            })
        );

        let cmd = controls.apply(&action(&table, GestureLabel::ClosedFist, ActionTrigger::Confirmed));
        assert_eq!(
            cmd,
            Some(ControlCommand::Voice {
                enabled: false,
                announcement: "Voix désactivée"
            })
        );
        assert!(!controls.voice_enabled());

        // Silent while voice is off
        let cmd = controls.apply(&action(&table, GestureLabel::ThumbsUp, ActionTrigger::Confirmed));
        assert_eq!(cmd, None);
        let cmd = controls.apply(&action(&table, GestureLabel::PointLeft, ActionTrigger::Confirmed));
        assert_eq!(
            cmd,
            Some(ControlCommand::Navigate {
                path: "/",
                name: "Accueil",
                announce: false
            })
        );

        controls.apply(&action(&table, GestureLabel::OpenHand, ActionTrigger::Confirmed));
        assert!(controls.voice_enabled());
        let cmd = controls.apply(&action(&table, GestureLabel::ThumbsUp, ActionTrigger::Confirmed));
        assert_eq!(cmd, Some(ControlCommand::Speak("OK".to_string())));
    }

    #[test]
    fn test_assistant_hold_completions_toggle() {
        let table = GestureTable::assistant();
        let mut controls = GestureControls::for_profile(Profile::Assistant);

        let cmd = controls.apply(&action(&table, GestureLabel::OpenHand, ActionTrigger::Confirmed));
        assert_eq!(cmd, Some(ControlCommand::Speak("Main Ouverte".to_string())));
        assert!(controls.camera_enabled());

        let cmd = controls.apply(&action(&table, GestureLabel::OpenHand, ActionTrigger::HoldCompleted));
        assert_eq!(cmd, Some(ControlCommand::Camera { enabled: false }));

        let cmd = controls.apply(&action(&table, GestureLabel::ClosedFist, ActionTrigger::HoldCompleted));
        assert_eq!(
            cmd,
            Some(ControlCommand::Voice {
                enabled: false,
                announcement: "Voix désactivée"
            })
        );
        let cmd = controls.apply(&action(&table, GestureLabel::ClosedFist, ActionTrigger::HoldCompleted));
        assert!(matches!(cmd, Some(ControlCommand::Voice { enabled: true, .. })));

        let cmd = controls.apply(&action(&table, GestureLabel::ThumbsUp, ActionTrigger::Confirmed));
        assert_eq!(cmd, Some(ControlCommand::Speak("Confirmer".to_string())));
    }

    #[test]
    fn test_external_route_change() {
        let table = GestureTable::navigation();
        let mut controls = GestureControls::for_profile(Profile::Navigation);
        controls.set_path("/shopping");

        let cmd = controls.apply(&action(&table, GestureLabel::PointRight, ActionTrigger::Confirmed));
        assert!(matches!(cmd, Some(ControlCommand::Navigate { path: "/translate", .. })));
        assert_eq!(controls.current_page(), Some(("/translate", "Traduction")));
    }
}
