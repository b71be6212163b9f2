//! Prompt cycle types
//!
//! A prompt cycle is `Closed -> Open -> Closed`. Every trigger goes through
//! [`LockController::present_prompt_cycle`](crate::LockController::present_prompt_cycle),
//! which picks the prompt kind and refuses to open a second prompt while one
//! is showing.

use std::fmt;

/// Which form the host should show
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptKind {
    /// First-run passcode creation
    Registration,
    /// Passcode entry to unlock
    Unlock,
}

/// Host-assigned identifier for an open prompt
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PromptHandle(pub u64);

/// What caused a prompt cycle to start
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockTrigger {
    /// No passcode configured yet
    FirstRun,
    /// App start with lock-on-startup enabled
    Startup,
    /// Lock shortcut pressed
    Shortcut,
    /// Idle timeout elapsed
    Idle,
    /// Locked through the API
    Manual,
}

impl fmt::Display for LockTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockTrigger::FirstRun => write!(f, "first_run"),
            LockTrigger::Startup => write!(f, "startup"),
            LockTrigger::Shortcut => write!(f, "shortcut"),
            LockTrigger::Idle => write!(f, "idle"),
            LockTrigger::Manual => write!(f, "manual"),
        }
    }
}

/// The prompt currently open, if any
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActivePrompt {
    pub handle: PromptHandle,
    pub kind: PromptKind,
    pub trigger: LockTrigger,
}
