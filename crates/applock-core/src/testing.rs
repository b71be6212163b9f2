//! In-memory host for tests

use crate::config::LockConfig;
use crate::error::ConfigError;
use crate::host::{Backdrop, ConfigStore, KeyBindings, ListenerId, Notifier, PromptHost, Severity};
use crate::prompt::{PromptHandle, PromptKind};
use crate::shortcut::KeyCombo;

/// One collaborator call, in order of arrival
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostCall {
    Notify {
        title: String,
        body: String,
        severity: Severity,
    },
    OpenPrompt(PromptKind),
    ClosePrompt(PromptHandle),
    Register(KeyCombo),
    Unregister(ListenerId),
    Blur(bool),
    Save,
}

/// Host that records every call and keeps state in memory
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub calls: Vec<HostCall>,
    /// Currently open prompts
    pub open: Vec<(PromptHandle, PromptKind)>,
    /// Currently registered listeners
    pub listeners: Vec<(ListenerId, KeyCombo)>,
    pub blur: bool,
    /// Every config passed to `save`
    pub saved: Vec<LockConfig>,
    /// Config returned from `load`
    pub stored: Option<LockConfig>,
    /// Make `save` fail with an I/O error
    pub fail_saves: bool,
    next_id: u64,
}

impl RecordingHost {
    /// Host whose store already holds `config`
    pub fn with_stored(config: LockConfig) -> Self {
        Self {
            stored: Some(config),
            ..Default::default()
        }
    }

    /// Notifications as `(title, body, severity)`
    pub fn notifications(&self) -> impl Iterator<Item = (&str, &str, Severity)> + '_ {
        self.calls.iter().filter_map(|call| match call {
            HostCall::Notify {
                title,
                body,
                severity,
            } => Some((title.as_str(), body.as_str(), *severity)),
            _ => None,
        })
    }

    /// Number of prompts opened so far
    pub fn prompts_opened(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, HostCall::OpenPrompt(_)))
            .count()
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl Notifier for RecordingHost {
    fn notify(&mut self, title: &str, body: &str, severity: Severity) {
        self.calls.push(HostCall::Notify {
            title: title.to_string(),
            body: body.to_string(),
            severity,
        });
    }
}

impl PromptHost for RecordingHost {
    fn open_prompt(&mut self, kind: PromptKind) -> PromptHandle {
        let handle = PromptHandle(self.next_id());
        self.open.push((handle, kind));
        self.calls.push(HostCall::OpenPrompt(kind));
        handle
    }

    fn close_prompt(&mut self, handle: PromptHandle) {
        self.open.retain(|(h, _)| *h != handle);
        self.calls.push(HostCall::ClosePrompt(handle));
    }
}

impl KeyBindings for RecordingHost {
    fn register(&mut self, combo: KeyCombo) -> ListenerId {
        let id = ListenerId(self.next_id());
        self.listeners.push((id, combo));
        self.calls.push(HostCall::Register(combo));
        id
    }

    fn unregister(&mut self, id: ListenerId) {
        self.listeners.retain(|(l, _)| *l != id);
        self.calls.push(HostCall::Unregister(id));
    }
}

impl Backdrop for RecordingHost {
    fn set_backdrop_blur(&mut self, enabled: bool) {
        self.blur = enabled;
        self.calls.push(HostCall::Blur(enabled));
    }
}

impl ConfigStore for RecordingHost {
    fn load(&self) -> Result<LockConfig, ConfigError> {
        Ok(self.stored.clone().unwrap_or_default())
    }

    fn save(&mut self, config: &LockConfig) -> Result<(), ConfigError> {
        self.calls.push(HostCall::Save);
        if self.fail_saves {
            return Err(ConfigError::Io("disk full".to_string()));
        }
        self.saved.push(config.clone());
        self.stored = Some(config.clone());
        Ok(())
    }
}
