//! Compare mode: fixed reference on the left, navigable comparison on the right

use super::{Session, ONE_UNTRASHED};
use crate::mode::ModeKind;
use crate::render::{Indicator, Role, Transition};
use crate::scheduler::TimerPurpose;

const NOTHING_TO_COMPARE: &str = "No next image to compare";

impl Session {
    pub(super) fn enter_compare(&mut self) {
        let switching = self.mode.kind() == ModeKind::Triptych;
        if switching {
            self.leave_mode(false);
        }
        let Some(current) = self.playlist.current_index() else {
            return;
        };

        let target = self
            .navigator
            .next_comparison_index(&self.playlist, &self.tags, current);
        let loaded = target.and_then(|index| match self.load(index) {
            Ok(image) => Some((index, image)),
            Err(e) => {
                tracing::warn!("Comparison image unloadable: {}", e);
                None
            }
        });
        let (index, image) = match loaded {
            Some(loaded) => loaded,
            None => {
                // A failed switch from Triptych still lands in Normal
                if switching {
                    self.redraw_normal();
                }
                self.notify_text(NOTHING_TO_COMPARE);
                return;
            }
        };
        let Some(path) = self.playlist.path(index).map(str::to_owned) else {
            return;
        };

        self.mode.enter_compare(index, path, self.paused);
        self.paused = true;
        self.pending_advance = None;
        self.scheduler.disarm(TimerPurpose::Advance);
        self.scheduler.disarm(TimerPurpose::TagAdvance);

        self.renderer.layout(ModeKind::Compare);
        self.show_reference();
        self.assign(Role::Comparison, Some(index), Some(image), Transition::Cut);
        self.renderer.divider(1.0);
        self.request_preload();
    }

    fn show_reference(&mut self) {
        let Some(current) = self.playlist.current_index() else {
            return;
        };
        let image = match self.load(current) {
            Ok(image) => Some(image),
            Err(e) => {
                tracing::warn!("Reference image unloadable: {}", e);
                None
            }
        };
        self.assign(Role::Current, Some(current), image, Transition::Cut);
    }

    /// Move the comparison pointer; the reference stays put
    pub(super) fn step_comparison(&mut self, forward: bool) {
        let Some(comparison) = self.mode.comparison_index() else {
            return;
        };
        let target = if forward {
            self.navigator
                .next_comparison_index(&self.playlist, &self.tags, comparison)
        } else {
            self.navigator.previous_comparison_index(&self.playlist, comparison)
        };
        let Some(target) = target else {
            return;
        };

        if self.show_comparison(target) {
            self.renderer.indicate(if forward { Indicator::NavForward } else { Indicator::NavBack });
        }
    }

    /// Load `index` into the comparison role. An unloadable image leaves the pointer where it was.
    pub(super) fn show_comparison(&mut self, index: usize) -> bool {
        let Some(path) = self.playlist.path(index).map(str::to_owned) else {
            return false;
        };
        let image = match self.load(index) {
            Ok(image) => image,
            Err(e) => {
                tracing::warn!("Comparison image unloadable: {}", e);
                return false;
            }
        };

        self.mode.set_comparison(index, path);
        self.assign(Role::Comparison, Some(index), Some(image), Transition::Cut);
        self.request_preload();
        true
    }

    /// Queued move after tagging the comparison item: next target, or leave Compare
    pub(super) fn advance_comparison_after(&mut self, from: &str) {
        let start = self
            .playlist
            .position_of(from)
            .or_else(|| self.mode.comparison_index());
        let next = start.and_then(|s| self.navigator.next_comparison_index(&self.playlist, &self.tags, s));

        match next {
            Some(index) if self.show_comparison(index) => {}
            _ => {
                self.leave_mode(true);
                self.notify_text(ONE_UNTRASHED);
            }
        }
    }
}
