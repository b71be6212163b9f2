//! Passcode registration prompt for first run

use applock_core::{Clock, ConfigStore, MIN_PASSCODE_LENGTH};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear};

use crate::app::{App, FormStep};
use crate::ui::components::passcode_field;
use crate::ui::layout::{centered_line, dialog_rect};

/// Draw the registration prompt
pub fn draw<S: ConfigStore, C: Clock>(frame: &mut Frame, area: Rect, app: &App<S, C>) {
    let theme = &app.theme;
    let confirming = app.state.form.step == FormStep::Confirm;

    let dialog = dialog_rect(60, 60, 56, 18, area);
    frame.render_widget(Clear, dialog);

    let block = Block::default()
        .title(" Set a Passcode ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused());

    let inner = block.inner(dialog);
    frame.render_widget(block, dialog);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Welcome
            Constraint::Length(3), // Instructions
            Constraint::Length(2), // Step indicator
            Constraint::Length(2), // Passcode display
            Constraint::Length(2), // Requirements
            Constraint::Length(2), // Error
            Constraint::Min(0),    // Spacer
            Constraint::Length(1), // Help
        ])
        .split(inner);

    frame.render_widget(centered_line("Welcome to Applock", theme.title()), chunks[0]);

    let instructions = if confirming {
        "Re-enter the passcode to confirm.\nIt cannot be recovered if forgotten."
    } else {
        "Choose a passcode to lock this chat.\nYou will need it every time the app locks."
    };
    frame.render_widget(centered_line(instructions, theme.text()), chunks[1]);

    let step_text = if confirming {
        "Step 2 of 2: Confirm passcode"
    } else {
        "Step 1 of 2: Create passcode"
    };
    frame.render_widget(centered_line(step_text, theme.text_secondary()), chunks[2]);

    let len = app.state.form.input_len();
    passcode_field::render(frame, chunks[3], len, MIN_PASSCODE_LENGTH, theme);

    if !confirming {
        let long_enough = len >= MIN_PASSCODE_LENGTH;
        let requirements = format!(
            "At least {} characters {}",
            MIN_PASSCODE_LENGTH,
            if long_enough { "✓" } else { "" }
        );
        let style = if long_enough {
            theme.success()
        } else {
            theme.text_muted()
        };
        frame.render_widget(centered_line(requirements, style), chunks[4]);
    }

    if let Some(error) = &app.state.error_message {
        frame.render_widget(centered_line(error.as_str(), theme.danger()), chunks[5]);
    }

    let help = if confirming {
        "[Enter] Save passcode    [Esc] Go back"
    } else {
        "[Enter] Continue    [Esc] Skip for now"
    };
    frame.render_widget(centered_line(help, theme.text_muted()), chunks[7]);
}
