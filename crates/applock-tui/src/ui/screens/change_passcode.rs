//! Change passcode form

use applock_core::{Clock, ConfigStore, MIN_PASSCODE_LENGTH};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear};

use crate::app::{App, FormStep};
use crate::ui::components::passcode_field;
use crate::ui::layout::{centered_line, dialog_rect, render_footer};

/// Draw the change passcode form
pub fn draw<S: ConfigStore, C: Clock>(frame: &mut Frame, area: Rect, app: &App<S, C>, dimmed: bool) {
    let theme = &app.theme;

    let dialog = dialog_rect(60, 50, 52, 14, area);
    frame.render_widget(Clear, area);

    if dimmed {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.backdrop());
        frame.render_widget(block, dialog);
        return;
    }

    let block = Block::default()
        .title(" Change Passcode ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused());

    let inner = block.inner(dialog);
    frame.render_widget(block, dialog);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Step
            Constraint::Length(2), // Passcode display
            Constraint::Length(2), // Error
            Constraint::Min(0),    // Spacer
            Constraint::Length(1), // Help
        ])
        .split(inner);

    let step_text = match app.state.form.step {
        FormStep::Current => "Step 1 of 3: Current passcode",
        FormStep::New => "Step 2 of 3: New passcode",
        FormStep::Confirm => "Step 3 of 3: Confirm new passcode",
    };
    frame.render_widget(centered_line(step_text, theme.text_secondary()), chunks[0]);

    passcode_field::render(
        frame,
        chunks[1],
        app.state.form.input_len(),
        MIN_PASSCODE_LENGTH,
        theme,
    );

    if let Some(error) = &app.state.error_message {
        frame.render_widget(centered_line(error.as_str(), theme.danger()), chunks[2]);
    }

    render_footer(
        frame,
        chunks[4],
        &[("Enter", "Next"), ("Esc", "Cancel")],
        theme,
    );
}
