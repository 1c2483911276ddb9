//! Named one-shot timers over a pluggable driver
//!
//! The scheduler owns the bookkeeping: one live token per purpose, and a
//! firing token that no longer matches is ignored. The driver only turns
//! `schedule` calls into `TimerFired(token)` events later on.

use std::collections::HashMap;
use std::time::Duration;

/// What a timer is for. At most one timer per purpose is ever armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerPurpose {
    /// Auto-advance after the display duration
    Advance,
    /// Delayed move after a Favorite/Trash decision
    TagAdvance,
    /// Clears the transient notice or pause icon
    StatusDecay,
    Rescan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(pub u64);

/// Delivers a token back to the control loop after a delay
pub trait TimerDriver: Send {
    fn schedule(&mut self, token: TimerToken, delay: Duration);
    fn cancel(&mut self, token: TimerToken);
}

pub struct Scheduler {
    driver: Box<dyn TimerDriver>,
    armed: HashMap<TimerPurpose, TimerToken>,
    next_token: u64,
}

impl Scheduler {
    pub fn new(driver: Box<dyn TimerDriver>) -> Self {
        Self {
            driver,
            armed: HashMap::new(),
            next_token: 1,
        }
    }

    /// Arm `purpose`, first disarming any timer already armed for it
    pub fn arm(&mut self, purpose: TimerPurpose, delay: Duration) -> TimerToken {
        self.disarm(purpose);

        let token = TimerToken(self.next_token);
        self.next_token += 1;
        self.driver.schedule(token, delay);
        self.armed.insert(purpose, token);
        tracing::trace!("Armed {:?} ({:?}) for {:?}", purpose, token, delay);
        token
    }

    pub fn disarm(&mut self, purpose: TimerPurpose) {
        if let Some(token) = self.armed.remove(&purpose) {
            self.driver.cancel(token);
            tracing::trace!("Disarmed {:?} ({:?})", purpose, token);
        }
    }

    pub fn disarm_all(&mut self) {
        let tokens: Vec<TimerToken> = self.armed.drain().map(|(_, t)| t).collect();
        for token in tokens {
            self.driver.cancel(token);
        }
    }

    pub fn is_armed(&self, purpose: TimerPurpose) -> bool {
        self.armed.contains_key(&purpose)
    }

    pub fn token(&self, purpose: TimerPurpose) -> Option<TimerToken> {
        self.armed.get(&purpose).copied()
    }

    /// Resolve a fired token to its purpose, consuming the arming.
    ///
    /// Tokens that were disarmed or replaced resolve to `None`.
    pub fn fire(&mut self, token: TimerToken) -> Option<TimerPurpose> {
        let purpose = self
            .armed
            .iter()
            .find_map(|(purpose, t)| (*t == token).then_some(*purpose))?;
        self.armed.remove(&purpose);
        Some(purpose)
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler").field("armed", &self.armed).finish()
    }
}
