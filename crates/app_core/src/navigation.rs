//! Index arithmetic over a playlist: next/previous, trash-skipping, comparison targets
//!
//! Every query is total and answers `None` when there is no eligible target,
//! including on an empty playlist.

use crate::config::LoopPolicy;
use crate::playlist::Playlist;
use crate::tag::TagView;

/// Computes navigation targets under a loop policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigator {
    policy: LoopPolicy,
}

impl Navigator {
    pub fn new(policy: LoopPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> LoopPolicy {
        self.policy
    }

    pub fn loops(&self) -> bool {
        self.policy == LoopPolicy::Loop
    }

    fn step_forward(&self, index: usize, len: usize) -> Option<usize> {
        let next = index + 1;
        if next < len {
            Some(next)
        } else if self.loops() {
            Some(0)
        } else {
            None
        }
    }

    fn step_backward(&self, index: usize, len: usize) -> Option<usize> {
        if index > 0 {
            Some(index - 1)
        } else if self.loops() {
            Some(len - 1)
        } else {
            None
        }
    }

    /// Next non-Trash item after the current one.
    ///
    /// `None` when the scan comes back around to the current item, or runs off
    /// the end without looping.
    pub fn next_untrashed_index(&self, playlist: &Playlist, tags: &TagView) -> Option<usize> {
        let current = playlist.current_index()?;
        let len = playlist.len();

        let mut candidate = current;
        for _ in 0..len {
            candidate = self.step_forward(candidate, len)?;
            if candidate == current {
                return None;
            }
            if !is_trashed(playlist, tags, candidate) {
                return Some(candidate);
            }
        }
        None
    }

    /// The item before the current one, Trash included.
    ///
    /// Always wraps below zero regardless of loop policy, so it succeeds on any
    /// non-empty playlist.
    pub fn previous_index(&self, playlist: &Playlist) -> Option<usize> {
        let current = playlist.current_index()?;
        if current > 0 {
            Some(current - 1)
        } else {
            Some(playlist.len() - 1)
        }
    }

    /// First non-Trash item from the top
    pub fn first_untrashed_index(&self, playlist: &Playlist, tags: &TagView) -> Option<usize> {
        (0..playlist.len()).find(|&i| !is_trashed(playlist, tags, i))
    }

    /// Every item is Trash (vacuously false on an empty playlist)
    pub fn all_trashed(&self, playlist: &Playlist, tags: &TagView) -> bool {
        !playlist.is_empty() && self.first_untrashed_index(playlist, tags).is_none()
    }

    /// Next comparison target after `after`: skips Trash and the current item.
    ///
    /// `None` if the scan returns to `after` or runs off the end without looping.
    pub fn next_comparison_index(
        &self,
        playlist: &Playlist,
        tags: &TagView,
        after: usize,
    ) -> Option<usize> {
        let current = playlist.current_index()?;
        let len = playlist.len();
        if after >= len {
            return None;
        }

        let mut candidate = after;
        for _ in 0..len {
            candidate = self.step_forward(candidate, len)?;
            if candidate == after {
                return None;
            }
            if candidate == current {
                continue;
            }
            if !is_trashed(playlist, tags, candidate) {
                return Some(candidate);
            }
        }
        None
    }

    /// Previous comparison target before `before`: Trash allowed, current item skipped
    pub fn previous_comparison_index(&self, playlist: &Playlist, before: usize) -> Option<usize> {
        let current = playlist.current_index()?;
        let len = playlist.len();
        if before >= len {
            return None;
        }

        let mut candidate = before;
        for _ in 0..len {
            candidate = self.step_backward(candidate, len)?;
            if candidate == before {
                return None;
            }
            if candidate == current {
                continue;
            }
            return Some(candidate);
        }
        None
    }
}

fn is_trashed(playlist: &Playlist, tags: &TagView, index: usize) -> bool {
    playlist
        .path(index)
        .map(|path| tags.is_trashed(path))
        .unwrap_or(false)
}
