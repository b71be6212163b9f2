//! Lock configuration
//!
//! Set once by the user and read on every unlock attempt. Every field has a
//! serde default so configs written by older versions still load.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::passcode::PasscodeHash;
use crate::shortcut::KeyCombo;

/// Default number of wrong attempts before lockout
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default lockout duration (5 minutes)
pub const DEFAULT_LOCKOUT_DURATION_SECS: u64 = 300;

/// Longest lockout accepted, one year
pub const MAX_LOCKOUT_DURATION_SECS: u64 = 365 * 24 * 60 * 60;

/// Default idle timeout (10 minutes)
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600;

/// What happens to the failed-attempt counter once a lockout window passes
/// without a successful unlock
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryPolicy {
    /// Start a fresh cycle of `max_attempts` tries
    #[default]
    ResetAttempts,
    /// Keep the counter, so the next wrong attempt locks out again at once
    KeepAttempts,
}

/// User-facing lock settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LockConfig {
    /// Registered passcode hash; `None` until first-run registration
    #[serde(default)]
    pub passcode: Option<PasscodeHash>,

    /// Show the unlock prompt as soon as the app starts
    #[serde(default = "default_lock_on_startup")]
    pub lock_on_startup: bool,

    /// Lock after this many seconds without activity (0 disables)
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,

    /// Wrong attempts allowed before lockout
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// How long a lockout lasts
    #[serde(default = "default_lockout_duration")]
    pub lockout_duration_seconds: u64,

    /// Global shortcut that locks the app
    #[serde(default)]
    pub lock_shortcut: KeyCombo,

    /// Counter handling after a lockout expires
    #[serde(default)]
    pub expiry_policy: ExpiryPolicy,
}

fn default_lock_on_startup() -> bool {
    true
}

fn default_idle_timeout() -> u64 {
    DEFAULT_IDLE_TIMEOUT_SECS
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_lockout_duration() -> u64 {
    DEFAULT_LOCKOUT_DURATION_SECS
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            passcode: None,
            lock_on_startup: true,
            idle_timeout_seconds: DEFAULT_IDLE_TIMEOUT_SECS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            lockout_duration_seconds: DEFAULT_LOCKOUT_DURATION_SECS,
            lock_shortcut: KeyCombo::default(),
            expiry_policy: ExpiryPolicy::default(),
        }
    }
}

impl LockConfig {
    /// Reject settings the controller cannot honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::InvalidMaxAttempts);
        }
        if self.lockout_duration_seconds > MAX_LOCKOUT_DURATION_SECS {
            return Err(ConfigError::InvalidLockoutDuration {
                max: MAX_LOCKOUT_DURATION_SECS,
            });
        }
        Ok(())
    }

    /// Whether a passcode has been registered
    pub fn is_registered(&self) -> bool {
        self.passcode.is_some()
    }

    /// Lockout duration in milliseconds
    pub fn lockout_duration_ms(&self) -> u64 {
        self.lockout_duration_seconds.saturating_mul(1000)
    }

    /// Idle timeout in milliseconds
    pub fn idle_timeout_ms(&self) -> u64 {
        self.idle_timeout_seconds.saturating_mul(1000)
    }
}
