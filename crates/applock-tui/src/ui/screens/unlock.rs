//! Unlock prompt

use applock_core::{Clock, ConfigStore, MIN_PASSCODE_LENGTH};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear};

use crate::app::App;
use crate::ui::components::passcode_field;
use crate::ui::layout::{centered_line, dialog_rect};

/// Draw the unlock prompt
pub fn draw<S: ConfigStore, C: Clock>(frame: &mut Frame, area: Rect, app: &App<S, C>) {
    let theme = &app.theme;

    // Center the unlock dialog
    let dialog = dialog_rect(50, 40, 44, 14, area);
    frame.render_widget(Clear, dialog);

    let block = Block::default()
        .title(" Locked ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused());

    let inner = block.inner(dialog);
    frame.render_widget(block, dialog);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(2), // Instructions
            Constraint::Length(2), // Passcode display
            Constraint::Length(2), // Error message
            Constraint::Min(0),    // Spacer
            Constraint::Length(1), // Help
        ])
        .split(inner);

    frame.render_widget(centered_line("◆ APPLOCK", theme.title()), chunks[0]);
    frame.render_widget(
        centered_line("Enter your passcode to unlock", theme.text_secondary()),
        chunks[1],
    );

    passcode_field::render(
        frame,
        chunks[2],
        app.state.form.input_len(),
        MIN_PASSCODE_LENGTH,
        theme,
    );

    if let Some(error) = &app.state.error_message {
        frame.render_widget(centered_line(error.as_str(), theme.danger()), chunks[3]);
    }

    frame.render_widget(
        centered_line("[Enter] Unlock    [Esc] Quit", theme.text_muted()),
        chunks[5],
    );

    // Attempts remaining warning
    let attempts = app.controller.attempts_remaining();
    let started = app.controller.state().attempt_count() > 0;
    if started && attempts > 0 && attempts <= 3 {
        let warning = format!(
            "⚠ {} attempt{} remaining before lockout",
            attempts,
            if attempts == 1 { "" } else { "s" }
        );
        let warning_y = dialog.y + dialog.height + 1;
        if warning_y < area.y + area.height {
            frame.render_widget(
                centered_line(warning, theme.warning()),
                Rect::new(area.x, warning_y, area.width, 1),
            );
        }
    }
}
