//! The running slideshow: single owner of playlist, mode, preload slot and timers
//!
//! Everything that mutates state arrives as a `SessionEvent` on one control
//! loop: user input, a fired timer, or a finished background decode. Handlers
//! never block except for the fallback decode when the preload slot misses.

mod compare;
mod rescan;
mod triptych;


use crate::config::{AppConfig, InitialMode, SlideshowConfig};
use crate::error::AppError;
use crate::image_loader::{ImageHandle, ImageSource, PreloadFetcher};
use crate::input::{route, Action, InputEvent};
use crate::mode::{ModeController, ModeKind};
use crate::navigation::Navigator;
use crate::playlist::Playlist;
use crate::preload::{PreloadCache, PreloadTicket};
use crate::reconcile::{DirectoryReconciler, ImageLister};
use crate::render::{Assignment, Indicator, Notice, PlaybackIcon, Renderer, Role, Transition};
use crate::scheduler::{Scheduler, TimerDriver, TimerPurpose, TimerToken};
use crate::tag::{Tag, TagDirection, TagMarkers, TagView};
use app_db::TagStore;
use app_fs::LaunchTarget;
use std::sync::Arc;

const ONE_UNTRASHED: &str = "1 untrashed image";

/// External capabilities a session drives
pub struct Collaborators {
    pub tag_store: Arc<dyn TagStore>,
    pub lister: Box<dyn ImageLister>,
    pub images: Arc<dyn ImageSource>,
    pub fetcher: Box<dyn PreloadFetcher>,
    pub timers: Box<dyn TimerDriver>,
    pub renderer: Box<dyn Renderer>,
}

/// Everything the control loop reacts to
#[derive(Debug)]
pub enum SessionEvent {
    Input(InputEvent),
    TimerFired(TimerToken),
    PreloadDelivered {
        ticket: PreloadTicket,
        result: Result<ImageHandle, AppError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Move queued by a Favorite/Trash decision, valid only in the mode that queued it
#[derive(Debug, Clone, PartialEq, Eq)]
enum PendingAdvance {
    Next,
    /// Comparison pointer moves on from the item that was tagged
    NextComparison { from: String },
    TriptychNext,
}

impl PendingAdvance {
    fn mode(&self) -> ModeKind {
        match self {
            PendingAdvance::Next => ModeKind::Normal,
            PendingAdvance::NextComparison { .. } => ModeKind::Compare,
            PendingAdvance::TriptychNext => ModeKind::Triptych,
        }
    }
}

pub struct Session {
    settings: SlideshowConfig,
    navigator: Navigator,
    playlist: Playlist,
    tags: TagView,
    mode: ModeController,
    preload: PreloadCache,
    scheduler: Scheduler,
    reconciler: DirectoryReconciler,
    images: Arc<dyn ImageSource>,
    fetcher: Box<dyn PreloadFetcher>,
    renderer: Box<dyn Renderer>,
    paused: bool,
    all_trashed: bool,
    pending_advance: Option<PendingAdvance>,
    seed: Option<u64>,
    finished: bool,
}

impl Session {
    /// List the directory, pick the starting item and put it on screen.
    ///
    /// Fails only when the session cannot start at all (empty directory,
    /// unreadable directory, invalid configuration).
    pub fn start(config: &AppConfig, launch: &LaunchTarget, collaborators: Collaborators) -> Result<Self, AppError> {
        let settings = config.slideshow.clone();
        settings.validate()?;

        let reconciler = DirectoryReconciler::new(launch.directory.clone(), collaborators.lister, settings.random);
        let listing = reconciler.initial(settings.seed)?;

        let mut session = Self {
            navigator: Navigator::new(settings.loop_mode),
            playlist: Playlist::new(listing.items),
            tags: TagView::new(collaborators.tag_store, TagMarkers::from(&config.tags)),
            mode: ModeController::new(),
            preload: PreloadCache::new(),
            scheduler: Scheduler::new(collaborators.timers),
            reconciler,
            images: collaborators.images,
            fetcher: collaborators.fetcher,
            renderer: collaborators.renderer,
            paused: false,
            all_trashed: false,
            pending_advance: None,
            seed: listing.seed,
            finished: false,
            settings,
        };

        tracing::info!(
            "Session started: {} images in {}",
            session.playlist.len(),
            launch.directory.display()
        );

        session.scheduler.arm(TimerPurpose::Rescan, session.settings.rescan_interval());
        session.renderer.layout(ModeKind::Normal);

        let start = launch
            .start_item
            .as_deref()
            .and_then(|item| session.playlist.position_of(item))
            .or_else(|| session.navigator.first_untrashed_index(&session.playlist, &session.tags));

        match start {
            Some(index) => {
                session.playlist.set_current(index);
                session.all_trashed = session.navigator.all_trashed(&session.playlist, &session.tags);
                session.show_initial();
            }
            None => session.enter_all_trashed(),
        }

        if !session.finished && !session.all_trashed {
            match session.settings.initial_mode {
                InitialMode::Normal => {}
                InitialMode::Compare => session.enter_compare(),
                InitialMode::Triptych => session.enter_triptych(),
            }
        }

        Ok(session)
    }

    /// Seed used for the shuffled order, if shuffled
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn mode(&self) -> &ModeController {
        &self.mode
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_all_trashed(&self) -> bool {
        self.all_trashed
    }

    pub fn handle(&mut self, event: SessionEvent) -> Flow {
        if self.finished {
            return Flow::Quit;
        }

        match event {
            SessionEvent::Input(input) => self.on_input(input),
            SessionEvent::TimerFired(token) => match self.scheduler.fire(token) {
                Some(purpose) => self.on_timer(purpose),
                None => {
                    tracing::trace!("Ignoring stale timer {:?}", token);
                    Flow::Continue
                }
            },
            SessionEvent::PreloadDelivered { ticket, result } => {
                if self.preload.deliver(ticket, result) {
                    tracing::debug!("Preload ready for index {}", ticket.index);
                }
                Flow::Continue
            }
        }
    }

    fn on_input(&mut self, input: InputEvent) -> Flow {
        let action = route(self.mode.state(), input);
        tracing::debug!("Input {:?} -> {:?}", input, action);

        match action {
            Action::Quit => return self.finish(),
            Action::Next => {
                self.cancel_tag_advance();
                self.renderer.indicate(Indicator::NavForward);
                return self.navigate(true, Transition::Cut, false);
            }
            Action::Previous => {
                self.cancel_tag_advance();
                self.renderer.indicate(Indicator::NavBack);
                return self.navigate(false, Transition::Cut, false);
            }
            Action::StepComparison { forward } => self.step_comparison(forward),
            Action::StepTriptych { forward } => self.step_triptych(forward),
            Action::Tag(direction) => self.tag(direction),
            Action::TogglePause => self.toggle_pause(),
            Action::Enter(ModeKind::Compare) => self.enter_compare(),
            Action::Enter(ModeKind::Triptych) => self.enter_triptych(),
            Action::Enter(ModeKind::Normal) | Action::Exit => self.leave_mode(true),
            Action::Divider(position) => {
                if let Some(applied) = self.mode.set_divider(position) {
                    self.renderer.divider(applied);
                }
            }
            Action::Ignore => {}
        }
        Flow::Continue
    }

    fn on_timer(&mut self, purpose: TimerPurpose) -> Flow {
        tracing::trace!("Timer fired: {:?}", purpose);
        match purpose {
            TimerPurpose::Advance => {
                if self.advance_running() {
                    let fade = Transition::CrossFade(self.settings.fade_duration());
                    return self.navigate(true, fade, true);
                }
            }
            TimerPurpose::TagAdvance => return self.run_pending_advance(),
            TimerPurpose::StatusDecay => self.renderer.clear_notice(),
            TimerPurpose::Rescan => {
                self.rescan();
                self.scheduler.arm(TimerPurpose::Rescan, self.settings.rescan_interval());
            }
        }
        Flow::Continue
    }

    // ===== Loading & presentation =====

    /// Image for `index`: the preloaded one if it is ready, else a blocking decode
    fn load(&mut self, index: usize) -> Result<ImageHandle, AppError> {
        if let Some(handle) = self.preload.take(index) {
            return Ok(handle);
        }
        let path = self
            .playlist
            .path(index)
            .ok_or_else(|| AppError::ImageDecode(format!("no item at index {}", index)))?;
        tracing::debug!("Preload miss for {}, decoding inline", path);
        self.images.load(path)
    }

    fn assign(&mut self, role: Role, index: Option<usize>, image: Option<ImageHandle>, transition: Transition) {
        let path = index.and_then(|i| self.playlist.path(i)).map(str::to_owned);
        let tag = path.as_deref().map(|p| self.tags.tag_of(p)).unwrap_or_default();
        self.renderer.assign(Assignment {
            role,
            path,
            image,
            tag,
            dimmed: tag.is_trash(),
            transition,
        });
    }

    fn show_initial(&mut self) {
        let Some(index) = self.playlist.current_index() else {
            return;
        };
        match self.load(index) {
            Ok(image) => {
                self.assign(Role::Current, Some(index), Some(image), Transition::Cut);
                self.after_move();
            }
            Err(e) => {
                tracing::warn!("Starting image unloadable, skipping: {}", e);
                self.navigate(true, Transition::Cut, false);
            }
        }
    }

    /// Preload whatever the active mode will most likely show next
    fn request_preload(&mut self) {
        let target = match self.mode.kind() {
            ModeKind::Compare => self
                .mode
                .comparison_index()
                .and_then(|c| self.navigator.next_comparison_index(&self.playlist, &self.tags, c)),
            ModeKind::Normal | ModeKind::Triptych => {
                self.navigator.next_untrashed_index(&self.playlist, &self.tags)
            }
        };

        let Some(index) = target else {
            self.preload.invalidate();
            return;
        };
        let Some(path) = self.playlist.path(index).map(str::to_owned) else {
            self.preload.invalidate();
            return;
        };
        let ticket = self.preload.request(index);
        tracing::debug!("Preloading {} ({:?})", path, ticket);
        self.fetcher.fetch(ticket, path);
    }

    fn notify(&mut self, notice: Notice) {
        let decay = match notice {
            Notice::Text(_) => self.settings.notice_duration(),
            Notice::Icon(_) => self.settings.icon_duration(),
        };
        self.renderer.notice(notice);
        self.scheduler.arm(TimerPurpose::StatusDecay, decay);
    }

    fn notify_text(&mut self, text: &str) {
        tracing::info!("{}", text);
        self.notify(Notice::Text(text.to_string()));
    }

    // ===== Auto-advance =====

    fn advance_running(&self) -> bool {
        self.mode.is_normal() && !self.paused && !self.all_trashed
    }

    /// Arm the advance timer when the show is running, disarm it otherwise
    fn rearm_advance(&mut self) {
        if self.advance_running() {
            self.scheduler.arm(TimerPurpose::Advance, self.settings.display_duration());
        } else {
            self.scheduler.disarm(TimerPurpose::Advance);
        }
    }

    fn after_move(&mut self) {
        self.request_preload();
        self.rearm_advance();
    }

    fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        tracing::info!("{}", if self.paused { "Paused" } else { "Playing" });
        self.rearm_advance();
        let icon = if self.paused { PlaybackIcon::Paused } else { PlaybackIcon::Playing };
        self.notify(Notice::Icon(icon));
    }

    // ===== Normal-mode navigation =====

    /// Move forward to the next untrashed item or back to the previous one.
    ///
    /// Unloadable items are passed over. Going forward without a successor
    /// falls through to `no_successor`.
    fn navigate(&mut self, forward: bool, transition: Transition, from_timer: bool) -> Flow {
        let Some(origin) = self.playlist.current_index() else {
            return Flow::Continue;
        };

        for _ in 0..self.playlist.len() {
            let candidate = if forward {
                self.navigator.next_untrashed_index(&self.playlist, &self.tags)
            } else {
                self.navigator.previous_index(&self.playlist)
            };
            let Some(candidate) = candidate.filter(|&c| c != origin) else {
                break;
            };

            self.playlist.set_current(candidate);
            match self.load(candidate) {
                Ok(image) => {
                    tracing::debug!("Moved {} -> {}", origin, candidate);
                    self.assign(Role::Current, Some(candidate), Some(image), transition);
                    self.after_move();
                    return Flow::Continue;
                }
                Err(e) => tracing::warn!("Skipping unloadable image: {}", e),
            }
        }

        self.playlist.set_current(origin);
        if forward {
            self.no_successor(from_timer)
        } else {
            Flow::Continue
        }
    }

    /// Nothing to move forward to. A non-looping show ends; otherwise either
    /// everything is Trash or the current item is the only one left.
    fn no_successor(&mut self, from_timer: bool) -> Flow {
        if !self.navigator.loops() {
            tracing::info!("Reached the end of the show");
            return self.finish();
        }

        if self.navigator.all_trashed(&self.playlist, &self.tags) {
            self.enter_all_trashed();
        } else {
            self.notify_text(ONE_UNTRASHED);
            if from_timer {
                self.rearm_advance();
            }
        }
        Flow::Continue
    }

    // ===== Tagging =====

    fn tag(&mut self, direction: TagDirection) {
        let (role, index, pending, delay) = match self.mode.kind() {
            ModeKind::Normal => (
                Role::Current,
                self.playlist.current_index(),
                PendingAdvance::Next,
                self.settings.tag_advance_delay(),
            ),
            ModeKind::Compare => {
                let index = self.mode.comparison_index();
                let from = index
                    .and_then(|i| self.playlist.path(i))
                    .unwrap_or_default()
                    .to_string();
                (
                    Role::Comparison,
                    index,
                    PendingAdvance::NextComparison { from },
                    self.settings.compare_tag_advance_delay(),
                )
            }
            ModeKind::Triptych => (
                Role::TriptychMiddle,
                self.playlist.current_index(),
                PendingAdvance::TriptychNext,
                self.settings.tag_advance_delay(),
            ),
        };

        let Some(path) = index.and_then(|i| self.playlist.path(i)).map(str::to_owned) else {
            return;
        };

        let was_all_trashed = self.all_trashed;
        let tag = self.tags.cycle(&path, direction);
        if !was_all_trashed {
            self.renderer.retag(role, tag);
        }
        self.react_to_tag(tag, direction, pending, delay);
    }

    /// Favorite or Trash queues a delayed move; Untagged cancels it and shows a neutral mark.
    ///
    /// While a move is queued the display timer is off, so only one advance can be pending.
    fn react_to_tag(&mut self, tag: Tag, direction: TagDirection, pending: PendingAdvance, delay: std::time::Duration) {
        if self.refresh_all_trashed() {
            return;
        }

        if tag.is_decided() {
            self.renderer.indicate(Indicator::Tagged(direction));
            self.pending_advance = Some(pending);
            self.scheduler.disarm(TimerPurpose::Advance);
            self.scheduler.arm(TimerPurpose::TagAdvance, delay);
        } else {
            self.renderer.indicate(Indicator::Neutral);
            self.cancel_tag_advance();
            self.rearm_advance();
        }
    }

    fn cancel_tag_advance(&mut self) {
        self.pending_advance = None;
        self.scheduler.disarm(TimerPurpose::TagAdvance);
    }

    fn run_pending_advance(&mut self) -> Flow {
        let Some(pending) = self.pending_advance.take() else {
            return Flow::Continue;
        };
        if pending.mode() != self.mode.kind() {
            tracing::debug!("Dropping {:?}: mode changed", pending);
            self.rearm_advance();
            return Flow::Continue;
        }

        match pending {
            PendingAdvance::Next => {
                self.renderer.indicate(Indicator::NavForward);
                let flow = self.navigate(true, Transition::Cut, false);
                // Staying put ("1 untrashed image") still resumes the display timer
                if flow == Flow::Continue {
                    self.rearm_advance();
                }
                flow
            }
            PendingAdvance::NextComparison { from } => {
                self.advance_comparison_after(&from);
                Flow::Continue
            }
            PendingAdvance::TriptychNext => {
                self.advance_triptych_after_tag();
                Flow::Continue
            }
        }
    }

    // ===== All-trashed state =====

    /// Recompute the all-trashed flag and act on a flip. Returns the new flag.
    fn refresh_all_trashed(&mut self) -> bool {
        let now = self.navigator.all_trashed(&self.playlist, &self.tags);
        match (self.all_trashed, now) {
            (false, true) => self.enter_all_trashed(),
            (true, false) => self.leave_all_trashed(),
            _ => {}
        }
        now
    }

    fn enter_all_trashed(&mut self) {
        tracing::info!("Every image is in the trash");
        if !self.mode.is_normal() {
            self.leave_mode(false);
            self.renderer.layout(ModeKind::Normal);
        }
        self.all_trashed = true;
        self.pending_advance = None;
        self.scheduler.disarm(TimerPurpose::Advance);
        self.scheduler.disarm(TimerPurpose::TagAdvance);
        self.preload.invalidate();
        self.renderer.all_trashed();
    }

    fn leave_all_trashed(&mut self) {
        tracing::info!("Untrashed images available again");
        self.all_trashed = false;

        match self.mode.kind() {
            ModeKind::Triptych => self.render_panels(Transition::Cut),
            _ => {
                let current_trashed = self
                    .playlist
                    .current_path()
                    .map(|p| self.tags.is_trashed(p))
                    .unwrap_or(false);
                if current_trashed {
                    if let Some(first) = self.navigator.first_untrashed_index(&self.playlist, &self.tags) {
                        self.playlist.set_current(first);
                    }
                }
                self.show_current(Transition::Cut);
            }
        }
        self.after_move();
    }

    /// Reassign the current item in Normal layout
    fn show_current(&mut self, transition: Transition) {
        let Some(index) = self.playlist.current_index() else {
            return;
        };
        let image = match self.load(index) {
            Ok(image) => Some(image),
            Err(e) => {
                tracing::warn!("Cannot show current image: {}", e);
                None
            }
        };
        self.assign(Role::Current, Some(index), image, transition);
    }

    // ===== Mode exit & shutdown =====

    /// Back to Normal, restoring the pause state from before the mode was entered.
    ///
    /// With `resume`, the Normal layout is redrawn and auto-advance picks up again.
    fn leave_mode(&mut self, resume: bool) {
        let Some(paused_before) = self.mode.leave() else {
            return;
        };
        self.paused = paused_before;
        self.cancel_tag_advance();

        if resume {
            self.redraw_normal();
        }
    }

    /// Normal layout with the current item (or the all-trashed display), auto-advance resumed
    fn redraw_normal(&mut self) {
        self.renderer.layout(ModeKind::Normal);
        if self.all_trashed {
            self.renderer.all_trashed();
        } else {
            self.show_current(Transition::Cut);
        }
        self.after_move();
    }

    fn finish(&mut self) -> Flow {
        if let Some(paused_before) = self.mode.leave() {
            self.paused = paused_before;
        }
        self.scheduler.disarm_all();
        self.preload.invalidate();
        self.pending_advance = None;
        self.finished = true;
        tracing::info!("Session finished");
        self.renderer.finished();
        Flow::Quit
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("playlist", &self.playlist)
            .field("mode", &self.mode)
            .field("paused", &self.paused)
            .field("all_trashed", &self.all_trashed)
            .finish()
    }
}
