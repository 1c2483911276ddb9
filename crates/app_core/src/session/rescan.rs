//! Merging a fresh directory listing into the live session

use super::{Session, ONE_UNTRASHED};
use crate::mode::ModeKind;
use crate::render::Transition;

impl Session {
    /// Re-list the directory and merge, keeping the viewer on the same item when it survived.
    ///
    /// Failed or empty listings leave everything untouched.
    pub(super) fn rescan(&mut self) {
        let Some(items) = self.reconciler.rescan() else {
            return;
        };
        let comparison_path = self.mode.comparison_path().map(str::to_owned);

        let Some(merge) = self.playlist.merge(items) else {
            return;
        };
        tracing::info!(
            "Rescan: {} images, current index {} -> {}{}",
            self.playlist.len(),
            merge.old_index,
            merge.new_index,
            if merge.identity_kept { "" } else { " (current item gone)" }
        );

        // Indices from before the merge mean nothing now
        self.preload.invalidate();

        let was_all_trashed = self.all_trashed;
        let now_all_trashed = self.navigator.all_trashed(&self.playlist, &self.tags);

        match (was_all_trashed, now_all_trashed) {
            (false, true) => {
                self.enter_all_trashed();
                return;
            }
            (true, false) => {
                self.leave_all_trashed();
                return;
            }
            (true, true) => return,
            (false, false) => {}
        }

        match self.mode.kind() {
            ModeKind::Normal => {
                if !merge.identity_kept {
                    self.show_current(Transition::Cut);
                }
            }
            ModeKind::Compare => {
                if !merge.identity_kept {
                    self.show_current(Transition::Cut);
                }
                self.remap_comparison(comparison_path);
            }
            ModeKind::Triptych => self.render_panels(Transition::Cut),
        }

        self.request_preload();
    }

    /// Find the comparison item again by path, else the next comparison target, else leave Compare
    fn remap_comparison(&mut self, comparison_path: Option<String>) {
        let current = self.playlist.current_index();
        let by_identity = comparison_path
            .as_deref()
            .and_then(|path| self.playlist.position_of(path))
            .filter(|&index| Some(index) != current);

        if let (Some(index), Some(path)) = (by_identity, comparison_path) {
            self.mode.set_comparison(index, path);
            return;
        }

        let fallback = current.and_then(|c| self.navigator.next_comparison_index(&self.playlist, &self.tags, c));
        if let Some(index) = fallback {
            if self.show_comparison(index) {
                return;
            }
        }

        tracing::info!("Comparison item gone, leaving compare mode");
        self.leave_mode(true);
        self.notify_text(ONE_UNTRASHED);
    }
}
