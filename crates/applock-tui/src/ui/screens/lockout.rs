//! Lockout countdown shown when too many attempts fail

use applock_core::{format_duration, Clock, ConfigStore, MIN_PASSCODE_LENGTH};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear};

use crate::app::App;
use crate::ui::components::passcode_field;
use crate::ui::layout::{centered_line, dialog_rect};

/// Draw the lockout screen
pub fn draw<S: ConfigStore, C: Clock>(frame: &mut Frame, area: Rect, app: &App<S, C>) {
    let theme = &app.theme;

    let dialog = dialog_rect(50, 50, 44, 17, area);
    frame.render_widget(Clear, dialog);

    // Dialog box with danger styling
    let block = Block::default()
        .title(" Locked Out ")
        .title_style(theme.danger())
        .borders(Borders::ALL)
        .border_style(theme.danger());

    let inner = block.inner(dialog);
    frame.render_widget(block, dialog);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Warning icon
            Constraint::Length(3), // Message
            Constraint::Length(2), // Countdown
            Constraint::Length(2), // Progress
            Constraint::Length(2), // Passcode display
            Constraint::Length(1), // Error
            Constraint::Min(0),    // Spacer
            Constraint::Length(1), // Help
        ])
        .split(inner);

    frame.render_widget(centered_line("⚠  LOCKED  ⚠", theme.danger()), chunks[0]);
    frame.render_widget(
        centered_line(
            "Too many failed attempts.\nPlease wait before trying again.",
            theme.text(),
        ),
        chunks[1],
    );

    let remaining = app.controller.lockout_remaining_seconds().unwrap_or(0);
    frame.render_widget(
        centered_line(
            format!("Time remaining: {}", format_duration(remaining)),
            theme.warning(),
        ),
        chunks[2],
    );

    passcode_field::render(
        frame,
        chunks[4],
        app.state.form.input_len(),
        MIN_PASSCODE_LENGTH,
        theme,
    );
    if let Some(error) = &app.state.error_message {
        frame.render_widget(centered_line(error.as_str(), theme.danger()), chunks[5]);
    }

    frame.render_widget(
        centered_line("[Enter] Submit  [Esc] Quit application", theme.text_muted()),
        chunks[7],
    );

    // Progress bar showing elapsed share of the lockout
    let total = u128::from(app.controller.config().lockout_duration_seconds.max(1));
    let elapsed = total.saturating_sub(u128::from(remaining));
    let bar_width = chunks[3].width.saturating_sub(4) as usize;
    let filled = usize::try_from(bar_width as u128 * elapsed / total).unwrap_or(bar_width);
    let bar = format!(
        "[{}{}]",
        "█".repeat(filled.min(bar_width)),
        "░".repeat(bar_width.saturating_sub(filled))
    );
    frame.render_widget(centered_line(bar, theme.danger()), chunks[3]);
}
