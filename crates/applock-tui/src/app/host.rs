//! Terminal implementation of the lock controller's collaborators

use applock_core::{
    Backdrop, ConfigError, ConfigStore, KeyBindings, KeyCombo, ListenerId, LockConfig, Notifier,
    PromptHandle, PromptHost, PromptKind, Severity,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ui::components::notification::{Notification, NotificationManager};

/// Holds everything the controller asks the terminal to show
pub struct TuiHost<S: ConfigStore> {
    /// Prompt currently on screen
    prompt: Option<(PromptHandle, PromptKind)>,
    /// Toasts
    pub notifications: NotificationManager,
    /// Dim the chat view behind the prompt
    blur: bool,
    /// Registered shortcut listeners
    bindings: Vec<(ListenerId, KeyCombo)>,
    store: S,
    next_id: u64,
}

impl<S: ConfigStore> TuiHost<S> {
    pub fn new(store: S) -> Self {
        Self {
            prompt: None,
            notifications: NotificationManager::new(),
            blur: false,
            bindings: Vec::new(),
            store,
            next_id: 0,
        }
    }

    pub fn prompt(&self) -> Option<(PromptHandle, PromptKind)> {
        self.prompt
    }

    pub fn is_blurred(&self) -> bool {
        self.blur
    }

    /// Whether a listener is registered for `combo`
    pub fn is_bound(&self, combo: &KeyCombo) -> bool {
        self.bindings.iter().any(|(_, c)| c == combo)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl<S: ConfigStore> Notifier for TuiHost<S> {
    fn notify(&mut self, title: &str, body: &str, severity: Severity) {
        let message = if body.is_empty() {
            title.to_string()
        } else {
            format!("{}: {}", title, body)
        };
        self.notifications.push(Notification::from_severity(message, severity));
    }
}

impl<S: ConfigStore> PromptHost for TuiHost<S> {
    fn open_prompt(&mut self, kind: PromptKind) -> PromptHandle {
        let handle = PromptHandle(self.next_id());
        self.prompt = Some((handle, kind));
        handle
    }

    fn close_prompt(&mut self, handle: PromptHandle) {
        if matches!(self.prompt, Some((h, _)) if h == handle) {
            self.prompt = None;
        }
    }
}

impl<S: ConfigStore> KeyBindings for TuiHost<S> {
    fn register(&mut self, combo: KeyCombo) -> ListenerId {
        let id = ListenerId(self.next_id());
        tracing::debug!("Listening for {}", combo);
        self.bindings.push((id, combo));
        id
    }

    fn unregister(&mut self, id: ListenerId) {
        self.bindings.retain(|(l, _)| *l != id);
    }
}

impl<S: ConfigStore> Backdrop for TuiHost<S> {
    fn set_backdrop_blur(&mut self, enabled: bool) {
        self.blur = enabled;
    }
}

impl<S: ConfigStore> ConfigStore for TuiHost<S> {
    fn load(&self) -> Result<LockConfig, ConfigError> {
        self.store.load()
    }

    fn save(&mut self, config: &LockConfig) -> Result<(), ConfigError> {
        self.store.save(config)
    }
}

/// Key combination for a key press, if it has a ctrl or alt modifier
pub fn key_combo(key: &KeyEvent) -> Option<KeyCombo> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    if !ctrl && !alt {
        return None;
    }
    match key.code {
        KeyCode::Char(c) => {
            let shift = key.modifiers.contains(KeyModifiers::SHIFT) || c.is_ascii_uppercase();
            Some(KeyCombo::new(c, ctrl, alt, shift))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use applock_core::testing::RecordingHost;
    use rstest::rstest;

    #[rstest]
    #[case(KeyCode::Char('l'), KeyModifiers::CONTROL, Some("ctrl+l"))]
    #[case(KeyCode::Char('L'), KeyModifiers::CONTROL | KeyModifiers::SHIFT, Some("ctrl+shift+l"))]
    #[case(KeyCode::Char('x'), KeyModifiers::ALT, Some("alt+x"))]
    #[case(KeyCode::Char('l'), KeyModifiers::NONE, None)]
    #[case(KeyCode::Char('L'), KeyModifiers::SHIFT, None)]
    #[case(KeyCode::Enter, KeyModifiers::CONTROL, None)]
    fn test_key_combo_conversion(
        #[case] code: KeyCode,
        #[case] modifiers: KeyModifiers,
        #[case] expected: Option<&str>,
    ) {
        let combo = key_combo(&KeyEvent::new(code, modifiers));
        assert_eq!(combo.map(|c| c.to_string()).as_deref(), expected);
    }

    #[test]
    fn test_prompt_tracking() {
        let mut host = TuiHost::new(RecordingHost::default());
        let handle = host.open_prompt(PromptKind::Unlock);
        assert_eq!(host.prompt(), Some((handle, PromptKind::Unlock)));

        host.close_prompt(PromptHandle(handle.0 + 1));
        assert!(host.prompt().is_some());

        host.close_prompt(handle);
        assert!(host.prompt().is_none());
    }

    #[test]
    fn test_bindings() {
        let mut host = TuiHost::new(RecordingHost::default());
        let id = host.register(KeyCombo::ctrl('l'));
        assert!(host.is_bound(&KeyCombo::ctrl('l')));
        assert!(!host.is_bound(&KeyCombo::ctrl('k')));

        host.unregister(id);
        assert!(!host.is_bound(&KeyCombo::ctrl('l')));
    }

    #[test]
    fn test_notify_pushes_toast() {
        let mut host = TuiHost::new(RecordingHost::default());
        host.notify("Unlocked", "Welcome back", Severity::Success);
        assert_eq!(host.notifications.len(), 1);
    }
}
