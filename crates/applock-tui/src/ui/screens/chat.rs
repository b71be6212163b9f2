//! Conversation screen

use applock_core::{format_duration, Clock, ConfigStore};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::App;
use crate::ui::layout::{render_footer, render_header};

/// Draw the chat screen; `dimmed` renders it as a backdrop
pub fn draw<S: ConfigStore, C: Clock>(frame: &mut Frame, area: Rect, app: &App<S, C>, dimmed: bool) {
    let theme = &app.theme;
    let dim = |style: Style| if dimmed { theme.backdrop() } else { style };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(3),    // Messages
            Constraint::Length(3), // Compose
            Constraint::Length(1), // Footer
        ])
        .split(area);

    render_header(frame, chunks[0], "APPLOCK CHAT", dim(theme.title()), theme);

    // Messages, newest at the bottom
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(dim(theme.border()))
        .title(" Conversation ");
    let inner = block.inner(chunks[1]);
    frame.render_widget(block, chunks[1]);

    let visible = inner.height as usize;
    let skip = app.state.messages.len().saturating_sub(visible);
    let lines: Vec<Line> = app
        .state
        .messages
        .iter()
        .skip(skip)
        .map(|message| {
            // Body is hidden while locked
            let body = if dimmed {
                "•••".to_string()
            } else {
                message.body.clone()
            };
            Line::from(vec![
                Span::styled(
                    format!("[{}] ", message.sent_at.format("%H:%M")),
                    dim(theme.text_muted()),
                ),
                Span::styled(format!("{}: ", message.author), dim(theme.title())),
                Span::styled(body, dim(theme.message(message.own))),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);

    // Compose box
    let compose = if dimmed {
        String::new()
    } else {
        format!("{}▏", app.state.compose)
    };
    let compose_widget = Paragraph::new(compose)
        .style(dim(theme.input(true)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(dim(theme.border_focused()))
                .title(" Message "),
        );
    frame.render_widget(compose_widget, chunks[2]);

    if dimmed {
        return;
    }

    let shortcut = app.controller.config().lock_shortcut.to_string();
    let idle = app
        .controller
        .idle_remaining_ms()
        .filter(|_| app.controller.is_registered())
        .map(|ms| format!("idle lock in {}", format_duration(ms.div_ceil(1000))));

    let mut hints = vec![
        ("Enter", "Send"),
        (shortcut.as_str(), "Lock"),
        ("ctrl+p", "Passcode"),
        ("Esc", "Quit"),
    ];
    if let Some(idle) = idle.as_deref() {
        hints.push(("⏱", idle));
    }
    render_footer(frame, chunks[3], &hints, theme);
}
