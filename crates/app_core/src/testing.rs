//! In-crate fakes for the session's collaborators

use crate::error::AppError;
use crate::image_loader::{ImageHandle, ImageSource, LoadedImage, PreloadFetcher};
use crate::mode::ModeKind;
use crate::preload::PreloadTicket;
use crate::reconcile::ImageLister;
use crate::render::{Assignment, Indicator, Notice, Renderer, Role};
use crate::scheduler::{TimerDriver, TimerToken};
use crate::tag::Tag;
use app_db::{DbError, TagSet, TagStore};
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashSet, VecDeque};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Tag store whose every call fails
pub struct FailingTagStore;

impl TagStore for FailingTagStore {
    fn get_tags(&self, _path: &str) -> app_db::Result<TagSet> {
        Err(DbError::Pool("store offline".into()))
    }

    fn set_tags(&self, _path: &str, _tags: &TagSet) -> app_db::Result<()> {
        Err(DbError::Pool("store offline".into()))
    }
}

/// Timers that only fire when a test says so
#[derive(Clone, Default)]
pub struct ManualTimerDriver {
    pending: Arc<Mutex<BTreeMap<TimerToken, Duration>>>,
}

impl ManualTimerDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Vec<TimerToken> {
        self.pending.lock().keys().copied().collect()
    }

    pub fn delay_of(&self, token: TimerToken) -> Option<Duration> {
        self.pending.lock().get(&token).copied()
    }

    /// Let `token` run out; false if it was never scheduled or already cancelled
    pub fn elapse(&self, token: TimerToken) -> bool {
        self.pending.lock().remove(&token).is_some()
    }
}

impl TimerDriver for ManualTimerDriver {
    fn schedule(&mut self, token: TimerToken, delay: Duration) {
        self.pending.lock().insert(token, delay);
    }

    fn cancel(&mut self, token: TimerToken) {
        self.pending.lock().remove(&token);
    }
}

#[derive(Default)]
struct ListerScript {
    queue: VecDeque<Vec<String>>,
    last: Vec<String>,
    fail_next: bool,
}

/// Returns queued listings in order, then repeats the last one
#[derive(Clone, Default)]
pub struct ScriptedLister {
    script: Arc<Mutex<ListerScript>>,
}

impl ScriptedLister {
    pub fn new(listings: Vec<Vec<String>>) -> Self {
        let lister = Self::default();
        for listing in listings {
            lister.push(listing);
        }
        lister
    }

    pub fn push(&self, listing: Vec<String>) {
        self.script.lock().queue.push_back(listing);
    }

    pub fn fail_next(&self) {
        self.script.lock().fail_next = true;
    }
}

impl ImageLister for ScriptedLister {
    fn list(&self, directory: &Path) -> Result<Vec<String>, AppError> {
        let mut script = self.script.lock();
        if std::mem::take(&mut script.fail_next) {
            return Err(AppError::PathNotFound(directory.display().to_string()));
        }
        if let Some(next) = script.queue.pop_front() {
            script.last = next;
        }
        Ok(script.last.clone())
    }
}

/// Decodes every path into a 1x1 placeholder, except the ones marked broken
#[derive(Clone, Default)]
pub struct FakeImages {
    broken: Arc<Mutex<HashSet<String>>>,
    loads: Arc<Mutex<Vec<String>>>,
}

impl FakeImages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn break_image(&self, path: &str) {
        self.broken.lock().insert(path.to_string());
    }

    pub fn loads(&self) -> Vec<String> {
        self.loads.lock().clone()
    }

    pub fn image(path: &str) -> ImageHandle {
        Arc::new(LoadedImage::placeholder(path))
    }
}

impl ImageSource for FakeImages {
    fn load(&self, path: &str) -> Result<ImageHandle, AppError> {
        self.loads.lock().push(path.to_string());
        if self.broken.lock().contains(path) {
            return Err(AppError::ImageDecode(path.to_string()));
        }
        Ok(Self::image(path))
    }
}

/// Records preload requests instead of starting them
#[derive(Clone, Default)]
pub struct RecordingFetcher {
    requests: Arc<Mutex<Vec<(PreloadTicket, String)>>>,
}

impl RecordingFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<(PreloadTicket, String)> {
        self.requests.lock().clone()
    }

    pub fn last(&self) -> Option<(PreloadTicket, String)> {
        self.requests.lock().last().cloned()
    }
}

impl PreloadFetcher for RecordingFetcher {
    fn fetch(&mut self, ticket: PreloadTicket, path: String) {
        self.requests.lock().push((ticket, path));
    }
}

#[derive(Debug, Clone)]
pub enum RenderCall {
    Layout(ModeKind),
    Assign(Assignment),
    Retag(Role, Tag),
    Divider(f64),
    Notice(Notice),
    ClearNotice,
    Indicate(Indicator),
    AllTrashed,
    Finished,
}

/// Keeps every call for later inspection
#[derive(Clone, Default)]
pub struct RecordingRenderer {
    calls: Arc<Mutex<Vec<RenderCall>>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.lock().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }

    /// Most recent assignment for `role`
    pub fn last_assignment(&self, role: Role) -> Option<Assignment> {
        self.calls.lock().iter().rev().find_map(|call| match call {
            RenderCall::Assign(a) if a.role == role => Some(a.clone()),
            _ => None,
        })
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                RenderCall::Notice(n) => Some(n.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn indicators(&self) -> Vec<Indicator> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                RenderCall::Indicate(i) => Some(*i),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, matches: impl Fn(&RenderCall) -> bool) -> usize {
        self.calls.lock().iter().filter(|c| matches(c)).count()
    }

    fn push(&self, call: RenderCall) {
        self.calls.lock().push(call);
    }
}

impl Renderer for RecordingRenderer {
    fn layout(&mut self, mode: ModeKind) {
        self.push(RenderCall::Layout(mode));
    }

    fn assign(&mut self, assignment: Assignment) {
        self.push(RenderCall::Assign(assignment));
    }

    fn retag(&mut self, role: Role, tag: Tag) {
        self.push(RenderCall::Retag(role, tag));
    }

    fn divider(&mut self, position: f64) {
        self.push(RenderCall::Divider(position));
    }

    fn notice(&mut self, notice: Notice) {
        self.push(RenderCall::Notice(notice));
    }

    fn clear_notice(&mut self) {
        self.push(RenderCall::ClearNotice);
    }

    fn indicate(&mut self, indicator: Indicator) {
        self.push(RenderCall::Indicate(indicator));
    }

    fn all_trashed(&mut self) {
        self.push(RenderCall::AllTrashed);
    }

    fn finished(&mut self) {
        self.push(RenderCall::Finished);
    }
}
