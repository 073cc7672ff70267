//! Resettable one-shot deadline for a single save channel.
//!
//! # Invariants
//! - At most one deadline is pending at any instant.
//! - `schedule` always replaces the pending deadline (cancel-and-restart).
//! - A deadline fires at most once.

/// Per-channel debounce state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer {
    delay_ms: u64,
    pending_deadline: Option<u64>,
}

impl Debouncer {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending_deadline: None,
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Cancels any pending deadline and arms a new one at `now + delay`.
    pub fn schedule(&mut self, now_ms: u64) -> u64 {
        let deadline = now_ms.saturating_add(self.delay_ms);
        self.pending_deadline = Some(deadline);
        deadline
    }

    pub fn cancel(&mut self) {
        self.pending_deadline = None;
    }

    pub fn pending_deadline(&self) -> Option<u64> {
        self.pending_deadline
    }

    pub fn is_pending(&self) -> bool {
        self.pending_deadline.is_some()
    }

    /// Returns `true` exactly once when the pending deadline has elapsed.
    pub fn fire_if_due(&mut self, now_ms: u64) -> bool {
        match self.pending_deadline {
            Some(deadline) if now_ms >= deadline => {
                self.pending_deadline = None;
                true
            }
            _ => false,
        }
    }
}
