//! Process-wide lock state
//!
//! One [`LockState`] is owned by each controller. It is never persisted, so a
//! restart begins with no failed attempts and no lockout.

use std::sync::atomic::{AtomicBool, Ordering};

/// What the lockout window looks like at a given instant
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockoutStatus {
    /// No lockout has been triggered since the last success
    Clear,
    /// Lockout in force for this many more milliseconds
    Active { remaining_ms: u64 },
    /// A lockout was triggered and its window has passed
    Elapsed,
}

/// Attempt counter, lockout expiry and modal flag
#[derive(Debug, Default)]
pub struct LockState {
    attempt_count: u32,
    lockout_expiry_ms: Option<u64>,
    modal_open: AtomicBool,
}

impl LockState {
    /// Failed attempts since the last success or reset
    pub fn attempt_count(&self) -> u32 {
        self.attempt_count
    }

    /// Lockout expiry timestamp, if a lockout has been triggered
    pub fn lockout_expiry_ms(&self) -> Option<u64> {
        self.lockout_expiry_ms
    }

    /// Classify the lockout window at `now_ms`
    pub fn lockout_status(&self, now_ms: u64) -> LockoutStatus {
        match self.lockout_expiry_ms {
            None => LockoutStatus::Clear,
            Some(expiry) if now_ms < expiry => LockoutStatus::Active {
                remaining_ms: expiry - now_ms,
            },
            Some(_) => LockoutStatus::Elapsed,
        }
    }

    /// True iff a lockout is set and has not yet expired
    pub fn is_locked_out(&self, now_ms: u64) -> bool {
        matches!(self.lockout_status(now_ms), LockoutStatus::Active { .. })
    }

    /// Count one failed attempt and return the new total
    pub(crate) fn record_failure(&mut self) -> u32 {
        self.attempt_count = self.attempt_count.saturating_add(1);
        self.attempt_count
    }

    /// Start a lockout window ending at `expiry_ms`
    pub(crate) fn start_lockout(&mut self, expiry_ms: u64) {
        self.lockout_expiry_ms = Some(expiry_ms);
    }

    /// Zero the counter and clear any lockout
    pub(crate) fn reset(&mut self) {
        self.attempt_count = 0;
        self.lockout_expiry_ms = None;
    }

    /// Whether a prompt is currently open
    pub fn is_modal_open(&self) -> bool {
        self.modal_open.load(Ordering::SeqCst)
    }

    /// Mark a prompt as open unless one already is
    ///
    /// Returns false when another prompt holds the flag.
    pub(crate) fn try_open_modal(&self) -> bool {
        self.modal_open
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /// Release the modal flag
    pub(crate) fn close_modal(&self) {
        self.modal_open.store(false, Ordering::SeqCst);
    }
}
