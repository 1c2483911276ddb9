//! Logical input events and their mode-sensitive routing

use crate::mode::{ModeKind, ModeState};
use crate::tag::TagDirection;
use serde::{Deserialize, Serialize};

/// Command identifier, as used in the key binding table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandId(pub String);

impl CommandId {
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    // Navigation commands
    pub const NAV_NEXT: &'static str = "nav.next";
    pub const NAV_PREV: &'static str = "nav.prev";

    // Tag commands
    pub const TAG_UP: &'static str = "tag.up";
    pub const TAG_DOWN: &'static str = "tag.down";

    // View commands
    pub const VIEW_TOGGLE_PAUSE: &'static str = "view.toggle_pause";
    pub const VIEW_COMPARE: &'static str = "view.compare";
    pub const VIEW_TRIPTYCH: &'static str = "view.triptych";

    // App commands
    pub const APP_QUIT: &'static str = "app.quit";
}

/// Normalized input, already decoupled from keys and pointer devices
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Advance,
    Retreat,
    TagUp,
    TagDown,
    TogglePause,
    ToggleCompare,
    ToggleTriptych,
    Quit,
    /// Click at a horizontal position normalized to [0, 1]
    Click { x: f64 },
    /// Drag of the compare divider, normalized to [0, 1]
    MoveDivider(f64),
}

impl InputEvent {
    pub fn from_command(id: &str) -> Option<Self> {
        let event = match id {
            CommandId::NAV_NEXT => InputEvent::Advance,
            CommandId::NAV_PREV => InputEvent::Retreat,
            CommandId::TAG_UP => InputEvent::TagUp,
            CommandId::TAG_DOWN => InputEvent::TagDown,
            CommandId::VIEW_TOGGLE_PAUSE => InputEvent::TogglePause,
            CommandId::VIEW_COMPARE => InputEvent::ToggleCompare,
            CommandId::VIEW_TRIPTYCH => InputEvent::ToggleTriptych,
            CommandId::APP_QUIT => InputEvent::Quit,
            _ => return None,
        };
        Some(event)
    }
}

/// What the session should do with an event in the current mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Normal: move to the next untrashed item
    Next,
    /// Normal: move to the previous item
    Previous,
    /// Compare: move the comparison pointer
    StepComparison { forward: bool },
    /// Triptych: make a side panel the current item
    StepTriptych { forward: bool },
    Tag(TagDirection),
    TogglePause,
    Enter(ModeKind),
    /// Back to Normal
    Exit,
    Divider(f64),
    Quit,
    Ignore,
}

const EDGE_ZONE: f64 = 0.1;
const TRIPTYCH_MARGIN: f64 = 1.0 / 30.0;

/// Route `event` according to the active mode
pub fn route(mode: &ModeState, event: InputEvent) -> Action {
    let kind = mode.kind();
    match event {
        InputEvent::Quit => Action::Quit,
        InputEvent::TagUp => Action::Tag(TagDirection::Up),
        InputEvent::TagDown => Action::Tag(TagDirection::Down),
        InputEvent::Advance => step(kind, true),
        InputEvent::Retreat => step(kind, false),
        InputEvent::TogglePause => match kind {
            ModeKind::Normal => Action::TogglePause,
            _ => Action::Ignore,
        },
        InputEvent::ToggleCompare => toggle(kind, ModeKind::Compare),
        InputEvent::ToggleTriptych => toggle(kind, ModeKind::Triptych),
        InputEvent::MoveDivider(x) => match kind {
            ModeKind::Compare => Action::Divider(x),
            _ => Action::Ignore,
        },
        InputEvent::Click { x } => click(kind, x),
    }
}

fn step(kind: ModeKind, forward: bool) -> Action {
    match (kind, forward) {
        (ModeKind::Normal, true) => Action::Next,
        (ModeKind::Normal, false) => Action::Previous,
        (ModeKind::Compare, forward) => Action::StepComparison { forward },
        (ModeKind::Triptych, forward) => Action::StepTriptych { forward },
    }
}

fn toggle(active: ModeKind, target: ModeKind) -> Action {
    if active == target {
        Action::Exit
    } else {
        Action::Enter(target)
    }
}

fn click(kind: ModeKind, x: f64) -> Action {
    match kind {
        ModeKind::Normal => {
            if x < EDGE_ZONE {
                Action::Previous
            } else if x > 1.0 - EDGE_ZONE {
                Action::Next
            } else {
                Action::TogglePause
            }
        }
        ModeKind::Triptych => {
            let panel = 1.0 / 3.0;
            if x < panel + TRIPTYCH_MARGIN {
                Action::StepTriptych { forward: false }
            } else if x > 2.0 * panel - TRIPTYCH_MARGIN {
                Action::StepTriptych { forward: true }
            } else {
                Action::Ignore
            }
        }
        // The divider owns the pointer
        ModeKind::Compare => Action::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NORMAL: ModeState = ModeState::Normal;
    const COMPARE: ModeState = ModeState::Compare {
        comparison_index: 1,
        divider_position: 1.0,
    };
    const TRIPTYCH: ModeState = ModeState::Triptych {
        left_index: None,
        right_index: None,
    };

    #[test]
    fn test_from_command() {
        assert_eq!(InputEvent::from_command("nav.next"), Some(InputEvent::Advance));
        assert_eq!(InputEvent::from_command("app.quit"), Some(InputEvent::Quit));
        assert_eq!(InputEvent::from_command("view.zoom_in"), None);
    }

    #[test]
    fn test_arrows_follow_mode() {
        assert_eq!(route(&NORMAL, InputEvent::Advance), Action::Next);
        assert_eq!(route(&NORMAL, InputEvent::Retreat), Action::Previous);
        assert_eq!(
            route(&COMPARE, InputEvent::Retreat),
            Action::StepComparison { forward: false }
        );
        assert_eq!(
            route(&TRIPTYCH, InputEvent::Advance),
            Action::StepTriptych { forward: true }
        );
    }

    #[test]
    fn test_mode_keys() {
        assert_eq!(route(&NORMAL, InputEvent::ToggleCompare), Action::Enter(ModeKind::Compare));
        assert_eq!(route(&COMPARE, InputEvent::ToggleCompare), Action::Exit);
        assert_eq!(route(&COMPARE, InputEvent::ToggleTriptych), Action::Enter(ModeKind::Triptych));
        assert_eq!(route(&TRIPTYCH, InputEvent::ToggleTriptych), Action::Exit);
        assert_eq!(route(&TRIPTYCH, InputEvent::ToggleCompare), Action::Enter(ModeKind::Compare));
    }

    #[test]
    fn test_pause_only_in_normal() {
        assert_eq!(route(&NORMAL, InputEvent::TogglePause), Action::TogglePause);
        assert_eq!(route(&COMPARE, InputEvent::TogglePause), Action::Ignore);
        assert_eq!(route(&TRIPTYCH, InputEvent::TogglePause), Action::Ignore);
    }

    #[test]
    fn test_quit_and_tags_everywhere() {
        for mode in [NORMAL, COMPARE, TRIPTYCH] {
            assert_eq!(route(&mode, InputEvent::Quit), Action::Quit);
            assert_eq!(route(&mode, InputEvent::TagDown), Action::Tag(TagDirection::Down));
        }
    }

    #[test]
    fn test_normal_click_zones() {
        assert_eq!(route(&NORMAL, InputEvent::Click { x: 0.05 }), Action::Previous);
        assert_eq!(route(&NORMAL, InputEvent::Click { x: 0.95 }), Action::Next);
        assert_eq!(route(&NORMAL, InputEvent::Click { x: 0.5 }), Action::TogglePause);
    }

    #[test]
    fn test_triptych_click_zones() {
        assert_eq!(
            route(&TRIPTYCH, InputEvent::Click { x: 0.36 }),
            Action::StepTriptych { forward: false }
        );
        assert_eq!(
            route(&TRIPTYCH, InputEvent::Click { x: 0.64 }),
            Action::StepTriptych { forward: true }
        );
        assert_eq!(route(&TRIPTYCH, InputEvent::Click { x: 0.5 }), Action::Ignore);
    }

    #[test]
    fn test_divider_only_in_compare() {
        assert_eq!(route(&COMPARE, InputEvent::Click { x: 0.05 }), Action::Ignore);
        assert_eq!(route(&COMPARE, InputEvent::MoveDivider(0.4)), Action::Divider(0.4));
        assert_eq!(route(&NORMAL, InputEvent::MoveDivider(0.4)), Action::Ignore);
    }
}
