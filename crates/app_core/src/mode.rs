//! Viewing mode state machine: Normal, Compare, Triptych

use crate::navigation::Navigator;
use crate::playlist::Playlist;
use crate::tag::TagView;

/// Which of the three modes is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeKind {
    Normal,
    Compare,
    Triptych,
}

/// The active mode with its auxiliary indices.
///
/// Auxiliary indices, when present, never equal the playlist's current index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModeState {
    Normal,
    Compare {
        comparison_index: usize,
        /// 1.0 shows the reference (current) image fully
        divider_position: f64,
    },
    Triptych {
        left_index: Option<usize>,
        right_index: Option<usize>,
    },
}

impl ModeState {
    pub fn kind(&self) -> ModeKind {
        match self {
            ModeState::Normal => ModeKind::Normal,
            ModeState::Compare { .. } => ModeKind::Compare,
            ModeState::Triptych { .. } => ModeKind::Triptych,
        }
    }
}

/// Owns the mode state and the pause state to restore when returning to Normal
#[derive(Debug)]
pub struct ModeController {
    state: ModeState,
    /// Path of the comparison item, for re-deriving its index after a rescan
    comparison_path: Option<String>,
    /// Pause state captured when leaving Normal
    paused_before: Option<bool>,
}

impl Default for ModeController {
    fn default() -> Self {
        Self {
            state: ModeState::Normal,
            comparison_path: None,
            paused_before: None,
        }
    }
}

impl ModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ModeState {
        &self.state
    }

    pub fn kind(&self) -> ModeKind {
        self.state.kind()
    }

    pub fn is_normal(&self) -> bool {
        self.kind() == ModeKind::Normal
    }

    pub fn comparison_index(&self) -> Option<usize> {
        match self.state {
            ModeState::Compare { comparison_index, .. } => Some(comparison_index),
            _ => None,
        }
    }

    pub fn comparison_path(&self) -> Option<&str> {
        self.comparison_path.as_deref()
    }

    pub fn divider_position(&self) -> Option<f64> {
        match self.state {
            ModeState::Compare { divider_position, .. } => Some(divider_position),
            _ => None,
        }
    }

    pub fn triptych_panels(&self) -> Option<(Option<usize>, Option<usize>)> {
        match self.state {
            ModeState::Triptych {
                left_index,
                right_index,
            } => Some((left_index, right_index)),
            _ => None,
        }
    }

    /// Remember the pause state on the way out of Normal; mode-to-mode switches keep the first one
    fn capture_pause(&mut self, paused: bool) {
        if self.paused_before.is_none() {
            self.paused_before = Some(paused);
        }
    }

    /// Enter Compare, leaving whatever mode was active first
    pub fn enter_compare(&mut self, comparison_index: usize, comparison_path: String, paused: bool) {
        self.capture_pause(paused);
        self.clear_auxiliary();
        self.state = ModeState::Compare {
            comparison_index,
            divider_position: 1.0,
        };
        self.comparison_path = Some(comparison_path);
        tracing::info!("Entered compare mode (comparison index {})", comparison_index);
    }

    /// Enter Triptych, leaving whatever mode was active first
    pub fn enter_triptych(&mut self, left_index: Option<usize>, right_index: Option<usize>, paused: bool) {
        self.capture_pause(paused);
        self.clear_auxiliary();
        self.state = ModeState::Triptych {
            left_index,
            right_index,
        };
        tracing::info!("Entered triptych mode");
    }

    /// Return to Normal. Yields the pause state to restore, or `None` if already Normal.
    pub fn leave(&mut self) -> Option<bool> {
        if self.is_normal() {
            return None;
        }
        tracing::info!("Left {:?} mode", self.kind());
        self.clear_auxiliary();
        self.state = ModeState::Normal;
        self.paused_before.take()
    }

    fn clear_auxiliary(&mut self) {
        self.comparison_path = None;
        self.state = ModeState::Normal;
    }

    /// Point Compare at a new comparison item, keeping the divider. No-op outside Compare.
    pub fn set_comparison(&mut self, index: usize, path: String) -> bool {
        match &mut self.state {
            ModeState::Compare { comparison_index, .. } => {
                *comparison_index = index;
                self.comparison_path = Some(path);
                true
            }
            _ => false,
        }
    }

    /// Move the divider, clamped into [0, 1]. Returns the applied position in Compare.
    pub fn set_divider(&mut self, position: f64) -> Option<f64> {
        match &mut self.state {
            ModeState::Compare { divider_position, .. } => {
                let clamped = if position.is_nan() { 1.0 } else { position.clamp(0.0, 1.0) };
                *divider_position = clamped;
                Some(clamped)
            }
            _ => None,
        }
    }

    pub fn set_panels(&mut self, left: Option<usize>, right: Option<usize>) -> bool {
        match &mut self.state {
            ModeState::Triptych {
                left_index,
                right_index,
            } => {
                *left_index = left;
                *right_index = right;
                true
            }
            _ => false,
        }
    }
}

/// Side panels around the current item: previous on the left, next untrashed on the right.
///
/// A panel that would show the current item itself is `None`.
pub fn compute_panels(
    navigator: &Navigator,
    playlist: &Playlist,
    tags: &TagView,
) -> (Option<usize>, Option<usize>) {
    let current = playlist.current_index();
    let left = navigator.previous_index(playlist).filter(|i| Some(*i) != current);
    let right = navigator
        .next_untrashed_index(playlist, tags)
        .filter(|i| Some(*i) != current);
    (left, right)
}
