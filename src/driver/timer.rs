//! StepTimer: the single pending reveal step.
//!
//! At most one deadline is armed at a time. Arming replaces the pending
//! deadline and cancelling clears it, so a cancelled step can never come
//! due later.

use std::time::Instant;

/// One cancellable deadline.
#[derive(Debug, Default)]
pub struct StepTimer {
    deadline: Option<Instant>,
}

impl StepTimer {
    /// Create a disarmed timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer for `at`, replacing any pending deadline.
    pub fn arm(&mut self, at: Instant) {
        self.deadline = Some(at);
    }

    /// Disarm.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// The pending deadline.
    #[inline]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether a step is pending.
    #[inline]
    pub const fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// If the pending step is due at `now`, disarm and return `true`.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(at) if at <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
