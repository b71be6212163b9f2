//! Lock events for audit logging

use chrono::{DateTime, Utc};

use crate::prompt::{LockTrigger, PromptKind};

/// Security-relevant lock events
#[derive(Debug, Clone)]
pub enum LockEvent {
    /// A prompt cycle started
    Locked {
        trigger: LockTrigger,
        prompt: PromptKind,
        timestamp: DateTime<Utc>,
    },
    /// Correct passcode entered
    Unlocked { timestamp: DateTime<Utc> },
    /// Wrong passcode entered
    AttemptFailed {
        attempt: u32,
        remaining: u32,
        timestamp: DateTime<Utc>,
    },
    /// Attempt limit reached
    LockoutStarted {
        duration_secs: u64,
        timestamp: DateTime<Utc>,
    },
    /// Attempt made while locked out
    AttemptDuringLockout {
        seconds_remaining: u64,
        timestamp: DateTime<Utc>,
    },
    /// Lockout window passed without a successful unlock
    LockoutElapsed {
        attempts_reset: bool,
        timestamp: DateTime<Utc>,
    },
    /// Prompt closed without unlocking
    PromptDismissed { timestamp: DateTime<Utc> },
    /// New passcode stored
    PasscodeRegistered { timestamp: DateTime<Utc> },
    /// Passcode removed
    PasscodeCleared { timestamp: DateTime<Utc> },
}

impl LockEvent {
    /// Format event for the audit log
    pub fn to_audit_string(&self) -> String {
        match self {
            LockEvent::Locked {
                trigger,
                prompt,
                timestamp,
            } => format!(
                "{} | APP_LOCKED | trigger={} prompt={:?}",
                format_ts(timestamp),
                trigger,
                prompt
            ),
            LockEvent::Unlocked { timestamp } => {
                format!("{} | APP_UNLOCKED", format_ts(timestamp))
            }
            LockEvent::AttemptFailed {
                attempt,
                remaining,
                timestamp,
            } => format!(
                "{} | UNLOCK_FAILED | attempt={} remaining={}",
                format_ts(timestamp),
                attempt,
                remaining
            ),
            LockEvent::LockoutStarted {
                duration_secs,
                timestamp,
            } => format!(
                "{} | LOCKOUT_STARTED | duration={}s",
                format_ts(timestamp),
                duration_secs
            ),
            LockEvent::AttemptDuringLockout {
                seconds_remaining,
                timestamp,
            } => format!(
                "{} | UNLOCK_REJECTED_LOCKOUT | remaining={}s",
                format_ts(timestamp),
                seconds_remaining
            ),
            LockEvent::LockoutElapsed {
                attempts_reset,
                timestamp,
            } => format!(
                "{} | LOCKOUT_ELAPSED | attempts_reset={}",
                format_ts(timestamp),
                attempts_reset
            ),
            LockEvent::PromptDismissed { timestamp } => {
                format!("{} | PROMPT_DISMISSED", format_ts(timestamp))
            }
            LockEvent::PasscodeRegistered { timestamp } => {
                format!("{} | PASSCODE_REGISTERED", format_ts(timestamp))
            }
            LockEvent::PasscodeCleared { timestamp } => {
                format!("{} | PASSCODE_CLEARED", format_ts(timestamp))
            }
        }
    }
}

fn format_ts(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
