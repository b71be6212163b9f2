//! Application state

use chrono::{DateTime, Local};
use zeroize::{Zeroize, Zeroizing};

/// Longest passcode the forms accept
pub const MAX_PASSCODE_INPUT: usize = 64;

/// Screen shown when no prompt is open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Conversation view
    #[default]
    Chat,

    /// Change passcode form
    ChangePasscode,
}

/// What is on screen, prompts included
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Chat,
    ChangePasscode,
    Registration,
    Unlock,
    Lockout,
}

impl View {
    /// Whether a lock prompt covers the chat
    pub fn is_prompt(&self) -> bool {
        matches!(self, View::Registration | View::Unlock | View::Lockout)
    }
}

/// Which field of a passcode form has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStep {
    /// Existing passcode (unlock, change)
    #[default]
    Current,
    /// New passcode (registration, change)
    New,
    /// New passcode again
    Confirm,
}

/// Input buffers for the passcode forms, wiped on every reset
#[derive(Default)]
pub struct PasscodeForm {
    pub step: FormStep,
    pub current: Zeroizing<String>,
    pub new: Zeroizing<String>,
    pub confirm: Zeroizing<String>,
}

impl PasscodeForm {
    /// Buffer for the focused field
    pub fn input_mut(&mut self) -> &mut String {
        match self.step {
            FormStep::Current => &mut *self.current,
            FormStep::New => &mut *self.new,
            FormStep::Confirm => &mut *self.confirm,
        }
    }

    /// Characters typed into the focused field
    pub fn input_len(&self) -> usize {
        let input = match self.step {
            FormStep::Current => &self.current,
            FormStep::New => &self.new,
            FormStep::Confirm => &self.confirm,
        };
        input.chars().count()
    }

    /// Append a character, up to the input limit
    pub fn push(&mut self, c: char) {
        let input = self.input_mut();
        if input.chars().count() < MAX_PASSCODE_INPUT {
            input.push(c);
        }
    }

    pub fn pop(&mut self) {
        self.input_mut().pop();
    }

    /// Wipe every field and focus `step`
    pub fn reset(&mut self, step: FormStep) {
        self.current.zeroize();
        self.new.zeroize();
        self.confirm.zeroize();
        self.step = step;
    }
}

/// A line in the conversation
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub author: String,
    pub body: String,
    pub own: bool,
    pub sent_at: DateTime<Local>,
}

impl ChatMessage {
    pub fn new(author: impl Into<String>, body: impl Into<String>, own: bool) -> Self {
        Self {
            author: author.into(),
            body: body.into(),
            own,
            sent_at: Local::now(),
        }
    }
}

/// Application state
pub struct AppState {
    /// Current screen
    pub current_screen: Screen,

    /// Conversation history
    pub messages: Vec<ChatMessage>,

    /// Message being composed
    pub compose: String,

    /// Passcode form buffers
    pub form: PasscodeForm,

    /// Inline error for the open form or prompt
    pub error_message: Option<String>,

    /// Whether the last frame showed the lockout countdown
    pub lockout_shown: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Create new application state
    pub fn new() -> Self {
        Self {
            current_screen: Screen::Chat,
            messages: Vec::new(),
            compose: String::new(),
            form: PasscodeForm::default(),
            error_message: None,
            lockout_shown: false,
        }
    }

    /// Send the composed message
    pub fn send_message(&mut self) {
        let body = self.compose.trim();
        if body.is_empty() {
            return;
        }
        self.messages.push(ChatMessage::new("you", body, true));
        self.compose.clear();
    }

    /// Clear status messages
    pub fn clear_messages(&mut self) {
        self.error_message = None;
    }
}
