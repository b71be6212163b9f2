//! Application state and event handling

mod config;
mod events;
mod host;
mod state;

pub use config::JsonConfigStore;
pub use events::{Event, EventHandler};
pub use host::{key_combo, TuiHost};
pub use state::{AppState, ChatMessage, FormStep, PasscodeForm, Screen, View, MAX_PASSCODE_INPUT};

use applock_core::{
    validate_new_passcode, AttemptOutcome, Clock, ConfigError, ConfigStore, LockConfig,
    LockController, LockError, Notifier, PasscodeHasher, PromptKind, Severity, SystemClock,
    ValidationError,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;

use crate::ui::{self, Theme};

/// Main application struct
pub struct App<S: ConfigStore, C: Clock = SystemClock> {
    /// Lock controller, owning the terminal host
    pub controller: LockController<TuiHost<S>, C>,

    /// Application state
    pub state: AppState,

    /// Color theme
    pub theme: Theme,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Tick counter for animations
    pub tick: u64,
}

impl<S: ConfigStore> App<S, SystemClock> {
    /// Create an app on the system clock
    pub fn new(config: LockConfig, store: S) -> Result<Self, ConfigError> {
        Self::with_clock(config, store, SystemClock)
    }
}

impl<S: ConfigStore, C: Clock> App<S, C> {
    /// Create an app on a custom clock
    pub fn with_clock(config: LockConfig, store: S, clock: C) -> Result<Self, ConfigError> {
        let welcome = format!(
            "Messages typed here stay on this machine. Press {} to lock.",
            config.lock_shortcut
        );
        let controller = LockController::new(config, TuiHost::new(store), clock)?;

        let mut state = AppState::new();
        state.messages.push(ChatMessage::new("applock", welcome, false));

        Ok(Self {
            controller,
            state,
            theme: Theme::default(),
            should_quit: false,
            tick: 0,
        })
    }

    /// Use a custom passcode hasher
    pub fn with_hasher(mut self, hasher: PasscodeHasher) -> Self {
        self.controller = self.controller.with_hasher(hasher);
        self
    }

    /// Start the controller and show the first prompt if one is due
    pub fn start(&mut self) {
        if self.controller.start().is_some() {
            self.reset_form_for_prompt();
        }
    }

    /// Run the application main loop
    pub async fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: &mut EventHandler,
    ) -> anyhow::Result<()> {
        self.start();

        while !self.should_quit {
            // Draw UI
            terminal.draw(|frame| ui::render(frame, self))?;

            match events.recv().await {
                Some(event) => self.handle_event(event),
                None => break,
            }
        }

        self.controller.stop();
        Ok(())
    }

    /// What is on screen right now
    pub fn view(&self) -> View {
        match self.controller.host().prompt() {
            Some((_, PromptKind::Registration)) => View::Registration,
            Some((_, PromptKind::Unlock)) if self.controller.is_locked_out() => View::Lockout,
            Some((_, PromptKind::Unlock)) => View::Unlock,
            None => match self.state.current_screen {
                Screen::Chat => View::Chat,
                Screen::ChangePasscode => View::ChangePasscode,
            },
        }
    }

    /// Dispatch one event
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Tick => self.on_tick(),
            Event::Resize => {}
        }
    }

    /// Advance timers: idle trigger, lockout countdown, toasts
    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        self.controller.host_mut().notifications.tick();

        if self.controller.poll_idle().is_some() {
            tracing::info!("Locked after idle timeout");
            self.reset_form_for_prompt();
        }

        let locked_out = self.view() == View::Lockout;
        if self.state.lockout_shown && !locked_out {
            // Countdown finished; drop the stale lockout message
            self.state.clear_messages();
        }
        self.state.lockout_shown = locked_out;
    }

    /// Handle key press events
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Registered shortcut listeners take precedence
        if let Some(combo) = key_combo(&key) {
            if self.controller.host().is_bound(&combo) {
                if self.controller.handle_shortcut(combo).is_some() {
                    self.reset_form_for_prompt();
                }
                return;
            }
        }

        // Global quit handler
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        // Delegate to view-specific handlers
        match self.view() {
            View::Chat => self.handle_chat_key(key),
            View::ChangePasscode => self.handle_change_key(key),
            View::Registration => self.handle_registration_key(key),
            View::Unlock => self.handle_unlock_key(key),
            View::Lockout => self.handle_lockout_key(key),
        }
    }

    fn reset_form_for_prompt(&mut self) {
        let step = match self.controller.host().prompt() {
            Some((_, PromptKind::Registration)) => FormStep::New,
            _ => FormStep::Current,
        };
        self.state.form.reset(step);
        self.state.clear_messages();
    }

    fn handle_chat_key(&mut self, key: KeyEvent) {
        self.controller.record_activity();

        if is_command(&key) {
            if key.code == KeyCode::Char('p') && key.modifiers.contains(KeyModifiers::CONTROL) {
                self.open_change_passcode();
            }
            return;
        }

        match key.code {
            KeyCode::Char(c) => self.state.compose.push(c),
            KeyCode::Backspace => {
                self.state.compose.pop();
            }
            KeyCode::Enter => self.state.send_message(),
            KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn open_change_passcode(&mut self) {
        if self.controller.is_registered() {
            self.state.current_screen = Screen::ChangePasscode;
            self.state.form.reset(FormStep::Current);
            self.state.clear_messages();
        } else if self.controller.lock().is_some() {
            // Nothing to change yet; offer registration instead
            self.reset_form_for_prompt();
        }
    }

    fn close_change_passcode(&mut self) {
        self.state.current_screen = Screen::Chat;
        self.state.form.reset(FormStep::Current);
        self.state.clear_messages();
    }

    fn handle_unlock_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) if !is_command(&key) => {
                self.state.form.push(c);
                self.state.clear_messages();
            }
            KeyCode::Backspace => self.state.form.pop(),
            KeyCode::Enter => {
                let result = self.controller.submit_unlock(&self.state.form.current);
                self.state.form.reset(FormStep::Current);
                match result {
                    Ok(AttemptOutcome::Accepted) => {
                        self.state.clear_messages();
                        self.state.current_screen = Screen::Chat;
                    }
                    Ok(AttemptOutcome::Rejected(rejection)) => {
                        self.state.error_message = Some(rejection.to_string());
                    }
                    Err(e) => {
                        tracing::error!("Unlock failed: {}", e);
                        self.state.error_message = Some(e.to_string());
                    }
                }
            }
            KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    /// Input is still taken during a lockout; every submission is refused
    fn handle_lockout_key(&mut self, key: KeyEvent) {
        self.handle_unlock_key(key);
    }

    fn handle_registration_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) if !is_command(&key) => {
                self.state.form.push(c);
                self.state.clear_messages();
            }
            KeyCode::Backspace => self.state.form.pop(),
            KeyCode::Enter => match self.state.form.step {
                FormStep::Confirm => self.submit_registration(),
                _ => self.advance_to_confirm(),
            },
            KeyCode::Esc => match self.state.form.step {
                FormStep::Confirm => {
                    self.state.form.reset(FormStep::New);
                    self.state.clear_messages();
                }
                _ => self.skip_registration(),
            },
            _ => {}
        }
    }

    fn advance_to_confirm(&mut self) {
        if validate_new_passcode(&self.state.form.new) {
            self.state.form.step = FormStep::Confirm;
            self.state.clear_messages();
        } else {
            self.state.error_message = Some(ValidationError::too_short().to_string());
        }
    }

    fn submit_registration(&mut self) {
        let form = &self.state.form;
        let result = self.controller.submit_registration(&form.new, &form.confirm);
        self.state.form.reset(FormStep::New);

        match result {
            Ok(()) => {
                self.state.clear_messages();
                self.state.current_screen = Screen::Chat;
            }
            Err(e) => {
                tracing::debug!("Registration rejected: {}", e);
                self.state.error_message = Some(e.to_string());
            }
        }
    }

    fn skip_registration(&mut self) {
        if let Some((handle, _)) = self.controller.host().prompt() {
            if self.controller.dismiss_prompt(handle) {
                let hint = format!(
                    "Press {} to set a passcode",
                    self.controller.config().lock_shortcut
                );
                self.controller
                    .host_mut()
                    .notify("Lock disabled", &hint, Severity::Info);
            }
        }
        self.state.form.reset(FormStep::Current);
        self.state.clear_messages();
    }

    fn handle_change_key(&mut self, key: KeyEvent) {
        self.controller.record_activity();

        match key.code {
            KeyCode::Char(c) if !is_command(&key) => {
                self.state.form.push(c);
                self.state.clear_messages();
            }
            KeyCode::Backspace => self.state.form.pop(),
            KeyCode::Enter => match self.state.form.step {
                FormStep::Current => {
                    self.state.form.step = FormStep::New;
                    self.state.clear_messages();
                }
                FormStep::New => self.advance_to_confirm(),
                FormStep::Confirm => self.submit_change(),
            },
            KeyCode::Esc => self.close_change_passcode(),
            _ => {}
        }
    }

    fn submit_change(&mut self) {
        let form = &self.state.form;
        let result = self
            .controller
            .change_passcode(&form.current, &form.new, &form.confirm);
        self.state.form.reset(FormStep::Current);

        match result {
            Ok(AttemptOutcome::Accepted) => {
                self.close_change_passcode();
                self.controller.host_mut().notify(
                    "Passcode changed",
                    "Use the new passcode from now on",
                    Severity::Success,
                );
            }
            Ok(AttemptOutcome::Rejected(rejection)) if rejection.is_lockout() => {
                self.close_change_passcode();
                if self.controller.lock().is_some() {
                    self.reset_form_for_prompt();
                }
                self.state.error_message = Some(rejection.to_string());
            }
            Ok(AttemptOutcome::Rejected(rejection)) => {
                self.state.error_message = Some(rejection.to_string());
            }
            Err(LockError::Validation(e)) => {
                // Buffers are already wiped; start over from the current passcode
                self.state.error_message = Some(e.to_string());
            }
            Err(e) => {
                tracing::error!("Passcode change failed: {}", e);
                self.state.error_message = Some(e.to_string());
            }
        }
    }
}

/// Ctrl or Alt chords are commands, never text
fn is_command(key: &KeyEvent) -> bool {
    key.modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}
