//! Collaborators supplied by the hosting application
//!
//! The controller owns no UI. It asks the host to show prompts, raise
//! notifications, blur the backdrop, listen for the lock shortcut and store
//! the config. A host implements all of these and gets [`LockHost`] for free.

use crate::config::LockConfig;
use crate::error::ConfigError;
use crate::prompt::{PromptHandle, PromptKind};
use crate::shortcut::KeyCombo;

/// Notification severity, mapped to a color by the host
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// Fire-and-forget user notifications
pub trait Notifier {
    fn notify(&mut self, title: &str, body: &str, severity: Severity);
}

/// Modal prompt presentation
pub trait PromptHost {
    /// Show a prompt and return a handle identifying it
    fn open_prompt(&mut self, kind: PromptKind) -> PromptHandle;

    /// Remove a prompt previously returned by `open_prompt`
    fn close_prompt(&mut self, handle: PromptHandle);
}

/// Identifier for a registered shortcut listener
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Global key-combination listener registry
pub trait KeyBindings {
    fn register(&mut self, combo: KeyCombo) -> ListenerId;
    fn unregister(&mut self, id: ListenerId);
}

/// Cosmetic backdrop effect while a prompt is open
pub trait Backdrop {
    fn set_backdrop_blur(&mut self, enabled: bool);
}

/// Persistence for [`LockConfig`]
pub trait ConfigStore {
    fn load(&self) -> Result<LockConfig, ConfigError>;
    fn save(&mut self, config: &LockConfig) -> Result<(), ConfigError>;
}

/// Everything the controller needs from its host
pub trait LockHost: Notifier + PromptHost + KeyBindings + Backdrop + ConfigStore {}

impl<T> LockHost for T where T: Notifier + PromptHost + KeyBindings + Backdrop + ConfigStore {}
