//! Single-slot speculative load with stale-result suppression

use crate::error::AppError;
use crate::image_loader::ImageHandle;

/// Identifies one preload request.
///
/// The generation makes tickets unique even when the same index is requested
/// again, e.g. after a rescan renumbered the playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PreloadTicket {
    pub index: usize,
    pub generation: u64,
}

#[derive(Debug)]
enum SlotState {
    Pending,
    Ready(ImageHandle),
}

#[derive(Debug)]
struct PreloadSlot {
    ticket: PreloadTicket,
    state: SlotState,
}

/// At most one tracked preload at a time
#[derive(Debug, Default)]
pub struct PreloadCache {
    slot: Option<PreloadSlot>,
    generation: u64,
}

impl PreloadCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a load of `index`, superseding whatever was tracked before
    pub fn request(&mut self, index: usize) -> PreloadTicket {
        self.generation += 1;
        let ticket = PreloadTicket {
            index,
            generation: self.generation,
        };
        if let Some(old) = self.slot.replace(PreloadSlot {
            ticket,
            state: SlotState::Pending,
        }) {
            if old.ticket.index != index {
                tracing::debug!("Preload of {} superseded by {}", old.ticket.index, index);
            }
        }
        ticket
    }

    /// Apply a finished load. Returns `false` when the ticket is no longer the target.
    pub fn deliver(&mut self, ticket: PreloadTicket, result: Result<ImageHandle, AppError>) -> bool {
        let Some(slot) = self.slot.as_mut() else {
            tracing::debug!("Dropping preload {:?}: nothing pending", ticket);
            return false;
        };
        if slot.ticket != ticket || !matches!(slot.state, SlotState::Pending) {
            tracing::debug!("Dropping stale preload {:?}", ticket);
            return false;
        }

        match result {
            Ok(handle) => {
                slot.state = SlotState::Ready(handle);
                true
            }
            Err(e) => {
                tracing::warn!("Preload of index {} failed: {}", ticket.index, e);
                self.slot = None;
                true
            }
        }
    }

    /// Hand out the preloaded image for `index` if it is ready
    pub fn take(&mut self, index: usize) -> Option<ImageHandle> {
        match &self.slot {
            Some(PreloadSlot {
                ticket,
                state: SlotState::Ready(_),
            }) if ticket.index == index => {}
            _ => return None,
        }
        match self.slot.take() {
            Some(PreloadSlot {
                state: SlotState::Ready(handle),
                ..
            }) => Some(handle),
            _ => None,
        }
    }

    /// Forget the current target; any in-flight delivery becomes stale
    pub fn invalidate(&mut self) {
        self.slot = None;
        self.generation += 1;
    }

    pub fn target(&self) -> Option<usize> {
        self.slot.as_ref().map(|s| s.ticket.index)
    }

    pub fn is_ready(&self) -> bool {
        matches!(
            self.slot,
            Some(PreloadSlot {
                state: SlotState::Ready(_),
                ..
            })
        )
    }
}
