//! Idle detection
//!
//! The idle trigger fires once per idle period. Any recorded activity re-arms
//! it, so a user who keeps working is never locked out from under them.

/// Activity tracker for the idle lock trigger
#[derive(Clone, Debug)]
pub struct IdleMonitor {
    /// Timeout in milliseconds (0 disables)
    timeout_ms: u64,
    /// Last activity timestamp
    last_activity_ms: u64,
    /// Whether the trigger already fired for this idle period
    fired: bool,
}

impl IdleMonitor {
    /// Create a monitor armed from `now_ms`
    pub fn new(timeout_ms: u64, now_ms: u64) -> Self {
        Self {
            timeout_ms,
            last_activity_ms: now_ms,
            fired: false,
        }
    }

    /// Whether idle locking is enabled
    pub fn is_enabled(&self) -> bool {
        self.timeout_ms > 0
    }

    /// Record activity (re-arms the trigger)
    pub fn touch(&mut self, now_ms: u64) {
        self.last_activity_ms = now_ms;
        self.fired = false;
    }

    /// Check if the idle timeout has elapsed
    pub fn is_idle(&self, now_ms: u64) -> bool {
        self.is_enabled() && now_ms.saturating_sub(self.last_activity_ms) >= self.timeout_ms
    }

    /// Milliseconds until the trigger fires, `None` if disabled
    pub fn remaining_ms(&self, now_ms: u64) -> Option<u64> {
        if !self.is_enabled() {
            return None;
        }
        let elapsed = now_ms.saturating_sub(self.last_activity_ms);
        Some(self.timeout_ms.saturating_sub(elapsed))
    }

    /// Returns true exactly once per idle period
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if self.fired || !self.is_idle(now_ms) {
            return false;
        }
        self.fired = true;
        true
    }
}
