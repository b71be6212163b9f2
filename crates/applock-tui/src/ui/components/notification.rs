//! Toast notification component

use applock_core::Severity;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::ui::Theme;

/// Toast notification
#[derive(Debug, Clone)]
pub struct Notification {
    /// Message to display
    pub message: String,
    /// Severity level
    pub severity: Severity,
    /// Remaining ticks until dismissal
    pub ttl: u64,
}

impl Notification {
    /// Create a new notification
    pub fn new(message: impl Into<String>, severity: Severity, ttl: u64) -> Self {
        Self {
            message: message.into(),
            severity,
            ttl,
        }
    }

    /// Create a notification with the default lifetime for its severity
    pub fn from_severity(message: impl Into<String>, severity: Severity) -> Self {
        let ttl = match severity {
            Severity::Info | Severity::Success => 12, // ~3 seconds at 4 ticks/s
            Severity::Warning => 20,                  // ~5 seconds
            Severity::Error => 24,                    // ~6 seconds
        };
        Self::new(message, severity, ttl)
    }

    /// Check if notification should be dismissed
    pub fn is_expired(&self) -> bool {
        self.ttl == 0
    }

    /// Decrement TTL
    pub fn tick(&mut self) {
        self.ttl = self.ttl.saturating_sub(1);
    }

    /// Get icon for level
    pub fn icon(&self) -> &'static str {
        match self.severity {
            Severity::Info => "ℹ",
            Severity::Success => "✓",
            Severity::Warning => "⚠",
            Severity::Error => "✗",
        }
    }

    /// Render the notification
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let style = theme.severity(self.severity);

        // Position at top-right
        let width = (self.message.chars().count() + 6).min(60) as u16;
        let width = width.min(area.width);
        let height = 3u16.min(area.height);
        let x = area.x + area.width.saturating_sub(width + 2);
        let y = area.y + 1u16.min(area.height.saturating_sub(height));

        let toast_area = Rect::new(x, y, width, height);

        // Clear background
        frame.render_widget(Clear, toast_area);

        let block = Block::default().borders(Borders::ALL).border_style(style);

        let text = format!("{} {}", self.icon(), self.message);
        let content = Paragraph::new(text)
            .style(style)
            .wrap(Wrap { trim: true })
            .block(block);

        frame.render_widget(content, toast_area);
    }
}

/// Notification manager for multiple toasts
#[derive(Debug)]
pub struct NotificationManager {
    /// Active notifications
    notifications: Vec<Notification>,
    /// Maximum notifications to show
    max_visible: usize,
}

impl NotificationManager {
    /// Create a new manager
    pub fn new() -> Self {
        Self {
            notifications: Vec::new(),
            max_visible: 3,
        }
    }

    /// Add a notification
    pub fn push(&mut self, notification: Notification) {
        self.notifications.push(notification);
        // Keep only the most recent
        while self.notifications.len() > self.max_visible {
            self.notifications.remove(0);
        }
    }

    /// Tick all notifications and remove expired
    pub fn tick(&mut self) {
        for n in &mut self.notifications {
            n.tick();
        }
        self.notifications.retain(|n| !n.is_expired());
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    /// Active notifications, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    /// Render all active notifications
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        for (i, notification) in self.notifications.iter().enumerate() {
            let offset_y = (i * 4) as u16;
            if offset_y >= area.height {
                break;
            }
            let adjusted_area = Rect::new(
                area.x,
                area.y + offset_y,
                area.width,
                area.height - offset_y,
            );
            notification.render(frame, adjusted_area, theme);
        }
    }
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry() {
        let mut manager = NotificationManager::new();
        manager.push(Notification::new("short", Severity::Info, 1));
        manager.push(Notification::new("long", Severity::Error, 3));

        manager.tick();
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.iter().next().unwrap().message, "long");

        manager.tick();
        manager.tick();
        assert!(manager.is_empty());
    }

    #[test]
    fn test_keeps_most_recent() {
        let mut manager = NotificationManager::new();
        for i in 0..5 {
            manager.push(Notification::from_severity(format!("n{}", i), Severity::Info));
        }
        let messages: Vec<&str> = manager.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["n2", "n3", "n4"]);
    }

    #[test]
    fn test_errors_outlive_info() {
        let info = Notification::from_severity("a", Severity::Info);
        let error = Notification::from_severity("b", Severity::Error);
        assert!(error.ttl > info.ttl);
    }
}
