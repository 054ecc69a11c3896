//! Latest-wins holder for a display surface
//!
//! Resizes started for successive selections are independent and may finish
//! in any order. A [`PreviewSlot`] hands out a [`Ticket`] per selection and
//! only keeps a finished result whose ticket is still the newest one.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::models::ResizedImage;

/// Identifies one selection made on a [`PreviewSlot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
struct SlotState {
    generation: u64,
    current: Option<ResizedImage>,
}

#[derive(Debug, Clone, Default)]
pub struct PreviewSlot {
    state: Arc<Mutex<SlotState>>,
}

impl PreviewSlot {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SlotState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a new selection. Tickets handed out earlier become stale.
    pub fn select(&self) -> Ticket {
        let mut state = self.lock();
        state.generation += 1;
        Ticket(state.generation)
    }

    /// Store `result` if `ticket` belongs to the newest selection.
    ///
    /// Returns `false` and drops the result when a newer selection exists.
    pub fn complete(&self, ticket: Ticket, result: ResizedImage) -> bool {
        let mut state = self.lock();
        if ticket.0 != state.generation {
            debug!(
                "Discarding stale preview {} (current selection is {})",
                ticket.0, state.generation
            );
            return false;
        }
        state.current = Some(result);
        true
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.lock().generation == ticket.0
    }

    pub fn current(&self) -> Option<ResizedImage> {
        self.lock().current.clone()
    }

    /// Drop the displayed image and invalidate any in-flight selection.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.generation += 1;
        state.current = None;
    }
}
