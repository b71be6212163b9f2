//! Applock Core - Passcode lock for a chat client
//!
//! This crate provides the lock logic with no UI of its own:
//! - Passcode registration, hashing and verification
//! - Failed-attempt counting and timed lockout
//! - Prompt cycles guarded against duplicate prompts
//! - Lock triggers: first run, startup, shortcut and idle timeout
//!
//! The host application supplies prompts, notifications and storage through
//! the traits in [`host`].
//!
//! # Optional Features
//!
//! - `testing` - Recording host for tests in downstream crates

pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod host;
pub mod idle;
pub mod outcome;
pub mod passcode;
pub mod prompt;
pub mod shortcut;
pub mod state;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ExpiryPolicy, LockConfig, MAX_LOCKOUT_DURATION_SECS};
pub use controller::LockController;
pub use error::{ConfigError, LockError, Result, ValidationError};
pub use event::LockEvent;
pub use host::{
    Backdrop, ConfigStore, KeyBindings, ListenerId, LockHost, Notifier, PromptHost, Severity,
};
pub use idle::IdleMonitor;
pub use outcome::{format_duration, AttemptOutcome, Rejection};
pub use passcode::{validate_new_passcode, PasscodeHash, PasscodeHasher, MIN_PASSCODE_LENGTH};
pub use prompt::{ActivePrompt, LockTrigger, PromptHandle, PromptKind};
pub use shortcut::KeyCombo;
pub use state::{LockState, LockoutStatus};
