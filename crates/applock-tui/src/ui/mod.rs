//! UI rendering

pub mod components;
pub mod layout;
pub mod screens;
pub mod theme;

pub use theme::Theme;

use applock_core::{Clock, ConfigStore};
use ratatui::prelude::*;

use crate::app::{App, Screen, View};

/// Main render function - draws the current screen, then any open prompt
/// over it, then toasts
pub fn render<S: ConfigStore, C: Clock>(frame: &mut Frame, app: &App<S, C>) {
    let area = frame.area();
    let dimmed = app.controller.host().is_blurred();

    match app.state.current_screen {
        Screen::Chat => screens::chat::draw(frame, area, app, dimmed),
        Screen::ChangePasscode => screens::change_passcode::draw(frame, area, app, dimmed),
    }

    match app.view() {
        View::Registration => screens::registration::draw(frame, area, app),
        View::Unlock => screens::unlock::draw(frame, area, app),
        View::Lockout => screens::lockout::draw(frame, area, app),
        View::Chat | View::ChangePasscode => {}
    }

    app.controller
        .host()
        .notifications
        .render(frame, area, &app.theme);
}
