//! Triptych mode: previous, current and next-untrashed side by side

use super::Session;
use crate::image_loader::ImageHandle;
use crate::mode::{compute_panels, ModeKind};
use crate::render::{Indicator, Role, Transition};
use crate::scheduler::TimerPurpose;

const NOTHING_TO_SHOW: &str = "No untrashed images";

impl Session {
    pub(super) fn enter_triptych(&mut self) {
        if self.all_trashed {
            self.notify_text(NOTHING_TO_SHOW);
            return;
        }
        if self.mode.kind() == ModeKind::Compare {
            self.leave_mode(false);
        }
        if self.playlist.current_index().is_none() {
            return;
        }

        let (left, right) = compute_panels(&self.navigator, &self.playlist, &self.tags);
        self.mode.enter_triptych(left, right, self.paused);
        self.paused = true;
        self.pending_advance = None;
        self.scheduler.disarm(TimerPurpose::Advance);
        self.scheduler.disarm(TimerPurpose::TagAdvance);

        self.renderer.layout(ModeKind::Triptych);
        self.render_panels(Transition::Cut);
        self.request_preload();
    }

    /// Recompute the side panels around the current item and redraw all three
    pub(super) fn render_panels(&mut self, transition: Transition) {
        let Some(current) = self.playlist.current_index() else {
            return;
        };
        let middle = match self.load(current) {
            Ok(image) => Some(image),
            Err(e) => {
                tracing::warn!("Middle panel unloadable: {}", e);
                None
            }
        };
        self.draw_panels(middle, transition);
    }

    /// A side with no distinct item shows the current image again
    fn draw_panels(&mut self, middle: Option<ImageHandle>, transition: Transition) {
        let Some(current) = self.playlist.current_index() else {
            return;
        };
        let (left, right) = compute_panels(&self.navigator, &self.playlist, &self.tags);
        self.mode.set_panels(left, right);

        for (role, side) in [(Role::TriptychLeft, left), (Role::TriptychRight, right)] {
            let (index, image) = match side {
                Some(index) => (index, self.load(index).ok()),
                None => (current, middle.clone()),
            };
            self.assign(role, Some(index), image, transition);
        }
        self.assign(Role::TriptychMiddle, Some(current), middle, transition);
    }

    /// Make the side panel in `forward` direction the current item.
    ///
    /// Unloadable items are passed over the way Normal navigation does.
    /// Returns false, with nothing changed, when no loadable item is reachable.
    fn move_triptych(&mut self, forward: bool) -> bool {
        let Some(origin) = self.playlist.current_index() else {
            return false;
        };

        for _ in 0..self.playlist.len() {
            let (left, right) = compute_panels(&self.navigator, &self.playlist, &self.tags);
            let Some(target) = (if forward { right } else { left }).filter(|&t| t != origin) else {
                break;
            };

            self.playlist.set_current(target);
            match self.load(target) {
                Ok(image) => {
                    self.draw_panels(Some(image), Transition::Cut);
                    self.request_preload();
                    return true;
                }
                Err(e) => tracing::warn!("Skipping unloadable image: {}", e),
            }
        }

        self.playlist.set_current(origin);
        false
    }

    pub(super) fn step_triptych(&mut self, forward: bool) {
        if self.mode.triptych_panels().is_none() {
            return;
        }
        if self.move_triptych(forward) {
            self.renderer.indicate(if forward { Indicator::NavForward } else { Indicator::NavBack });
        }
    }

    /// Queued move after tagging the middle item: on to the next untrashed one, if any
    pub(super) fn advance_triptych_after_tag(&mut self) {
        if !self.move_triptych(true) {
            self.render_panels(Transition::Cut);
            self.request_preload();
        }
    }
}
