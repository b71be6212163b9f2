//! Masked passcode display

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::ui::Theme;

/// Dots shown before the display starts counting instead
const MAX_DOTS: usize = 12;

/// Build the masked display for a passcode of `len` characters
///
/// Shows `●` per entered character and `○` placeholders up to the minimum
/// length. Long passcodes collapse to a count.
pub fn mask(len: usize, min_len: usize) -> String {
    if len > MAX_DOTS {
        return format!("[ ● × {} ]", len);
    }

    let slots = len.max(min_len);
    let dots: Vec<&str> = (0..slots)
        .map(|i| if i < len { "●" } else { "○" })
        .collect();
    format!("[ {} ]", dots.join(" "))
}

/// Render the masked field centered in `area`
pub fn render(frame: &mut Frame, area: Rect, len: usize, min_len: usize, theme: &Theme) {
    let style = if len >= min_len {
        theme.pin_dot()
    } else {
        theme.pin_placeholder()
    };

    let widget = Paragraph::new(mask(len, min_len))
        .style(style)
        .alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask() {
        assert_eq!(mask(0, 4), "[ ○ ○ ○ ○ ]");
        assert_eq!(mask(2, 4), "[ ● ● ○ ○ ]");
        assert_eq!(mask(6, 4), "[ ● ● ● ● ● ● ]");
        assert_eq!(mask(20, 4), "[ ● × 20 ]");
    }
}
