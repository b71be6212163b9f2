//! Error types for the lock controller

use thiserror::Error;

use crate::passcode::MIN_PASSCODE_LENGTH;

/// Result type alias for lock operations
pub type Result<T> = std::result::Result<T, LockError>;

/// Errors that can occur in lock operations
///
/// Wrong passcodes and lockouts are not errors; they are reported through
/// [`AttemptOutcome`](crate::AttemptOutcome). This enum covers the cases where
/// an attempt could not be evaluated at all.
#[derive(Debug, Error)]
pub enum LockError {
    /// No passcode has been registered yet
    #[error("No passcode registered - complete registration first")]
    NotRegistered,

    /// Registration form rejected the new passcode
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Stored hash could not be parsed
    #[error("Stored passcode is corrupt: {0}")]
    CorruptHash(String),

    /// Hashing a new passcode failed
    #[error("Failed to hash passcode: {0}")]
    Hash(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Registration form validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Passcode must be at least {min} characters")]
    TooShort { min: usize },

    #[error("Passcodes do not match")]
    Mismatch,
}

impl ValidationError {
    /// Too-short error with the crate minimum
    pub fn too_short() -> Self {
        ValidationError::TooShort {
            min: MIN_PASSCODE_LENGTH,
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("max_attempts must be at least 1")]
    InvalidMaxAttempts,

    #[error("lockout_duration_seconds must be at most {max}")]
    InvalidLockoutDuration { max: u64 },

    #[error("Invalid shortcut '{0}'")]
    InvalidShortcut(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e.to_string())
    }
}
