//! tokio-backed drivers and the control loop
//!
//! Timers and background decodes run as tokio tasks; each one ends by sending
//! a single `SessionEvent` back into the channel the control loop drains.

use crate::image_loader::{ImageSource, PreloadFetcher};
use crate::preload::PreloadTicket;
use crate::scheduler::{TimerDriver, TimerToken};
use crate::session::{Flow, Session, SessionEvent};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub type EventSender = mpsc::UnboundedSender<SessionEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<SessionEvent>;

pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

/// One sleeping task per armed timer; cancelling aborts the task
pub struct TokioTimerDriver {
    events: EventSender,
    tasks: HashMap<TimerToken, JoinHandle<()>>,
}

impl TokioTimerDriver {
    pub fn new(events: EventSender) -> Self {
        Self {
            events,
            tasks: HashMap::new(),
        }
    }
}

impl TimerDriver for TokioTimerDriver {
    fn schedule(&mut self, token: TimerToken, delay: Duration) {
        self.tasks.retain(|_, task| !task.is_finished());

        let events = self.events.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events.send(SessionEvent::TimerFired(token));
        });
        self.tasks.insert(token, task);
    }

    fn cancel(&mut self, token: TimerToken) {
        if let Some(task) = self.tasks.remove(&token) {
            task.abort();
        }
    }
}

impl Drop for TokioTimerDriver {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

/// Decodes on the blocking pool.
///
/// A superseded decode is left to finish; the preload slot discards its result.
pub struct BackgroundFetcher {
    images: Arc<dyn ImageSource>,
    events: EventSender,
}

impl BackgroundFetcher {
    pub fn new(images: Arc<dyn ImageSource>, events: EventSender) -> Self {
        Self { images, events }
    }
}

impl PreloadFetcher for BackgroundFetcher {
    fn fetch(&mut self, ticket: PreloadTicket, path: String) {
        let images = Arc::clone(&self.images);
        let events = self.events.clone();
        tokio::task::spawn_blocking(move || {
            let result = images.load(&path);
            let _ = events.send(SessionEvent::PreloadDelivered { ticket, result });
        });
    }
}

/// Drain events into the session until it quits or every sender is gone
pub async fn run(mut session: Session, mut events: EventReceiver) {
    if session.is_finished() {
        return;
    }

    while let Some(event) = events.recv().await {
        if session.handle(event) == Flow::Quit {
            break;
        }
    }
    tracing::debug!("Control loop stopped");
}
