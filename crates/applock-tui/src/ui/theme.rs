//! Visual theme and color palette

use applock_core::Severity;
use ratatui::style::{Color, Modifier, Style};

/// Applock color palette
pub struct Theme {
    // Primary branding colors
    pub accent: Color,
    pub accent_dim: Color,
    pub background: Color,

    // Status colors
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
    pub info: Color,

    // UI element colors
    pub border: Color,
    pub border_focused: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    // Chat bubbles
    pub own_message: Color,
    pub peer_message: Color,

    // Progress bar colors
    pub progress_filled: Color,
    pub progress_empty: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            // Primary branding - Teal
            accent: Color::Rgb(0, 188, 212),     // #00BCD4
            accent_dim: Color::Rgb(0, 131, 143), // #00838F
            background: Color::Rgb(33, 33, 33),  // #212121

            // Status colors
            success: Color::Rgb(76, 175, 80), // #4CAF50 - Green
            warning: Color::Rgb(255, 152, 0), // #FF9800 - Orange
            danger: Color::Rgb(244, 67, 54),  // #F44336 - Red
            info: Color::Rgb(33, 150, 243),   // #2196F3 - Blue

            // UI elements
            border: Color::Rgb(66, 66, 66),            // #424242
            border_focused: Color::Rgb(0, 188, 212),   // #00BCD4
            text_primary: Color::Rgb(250, 250, 250),   // #FAFAFA
            text_secondary: Color::Rgb(189, 189, 189), // #BDBDBD
            text_muted: Color::Rgb(117, 117, 117),     // #757575

            own_message: Color::Rgb(128, 222, 234),  // #80DEEA
            peer_message: Color::Rgb(224, 224, 224), // #E0E0E0

            progress_filled: Color::Rgb(244, 67, 54),
            progress_empty: Color::Rgb(66, 66, 66),
        }
    }
}

impl Theme {
    /// Get default text style
    pub fn text(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    /// Get secondary text style
    pub fn text_secondary(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    /// Get muted text style
    pub fn text_muted(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    /// Get title style
    pub fn title(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// Get border style
    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Get focused border style
    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.border_focused)
    }

    /// Get success style
    pub fn success(&self) -> Style {
        Style::default().fg(self.success)
    }

    /// Get warning style
    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning)
    }

    /// Get danger style
    pub fn danger(&self) -> Style {
        Style::default().fg(self.danger).add_modifier(Modifier::BOLD)
    }

    /// Get info style
    pub fn info(&self) -> Style {
        Style::default().fg(self.info)
    }

    /// Style for a notification severity
    pub fn severity(&self, severity: Severity) -> Style {
        match severity {
            Severity::Info => self.info(),
            Severity::Success => self.success(),
            Severity::Warning => self.warning(),
            Severity::Error => self.danger(),
        }
    }

    /// Chat line style
    pub fn message(&self, own: bool) -> Style {
        if own {
            Style::default().fg(self.own_message)
        } else {
            Style::default().fg(self.peer_message)
        }
    }

    /// Everything behind an open prompt
    pub fn backdrop(&self) -> Style {
        Style::default()
            .fg(self.text_muted)
            .add_modifier(Modifier::DIM)
    }

    /// Get input field style
    pub fn input(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.text_primary).bg(self.background)
        } else {
            Style::default().fg(self.text_secondary).bg(self.background)
        }
    }

    /// Get passcode dot style
    pub fn pin_dot(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// Get passcode placeholder style
    pub fn pin_placeholder(&self) -> Style {
        Style::default().fg(self.text_muted)
    }
}
