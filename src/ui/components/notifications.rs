//! Short-lived messages stacked in the top-right corner.

use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::icons::IconService;
use crate::ui::core::NotificationLevel;

const MAX_VISIBLE: usize = 4;
const TOAST_WIDTH: u16 = 48;

#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    shown_at: Instant,
}

pub struct Notifications {
    items: Vec<Notification>,
    lifetime: Duration,
    pub icons: IconService,
}

impl Notifications {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            items: Vec::new(),
            lifetime,
            icons: IconService::default(),
        }
    }

    pub fn push(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.items.push(Notification {
            level,
            message: message.into(),
            shown_at: Instant::now(),
        });
        if self.items.len() > MAX_VISIBLE {
            self.items.remove(0);
        }
    }

    /// Drop expired notifications
    pub fn prune(&mut self) {
        let lifetime = self.lifetime;
        self.items.retain(|n| n.shown_at.elapsed() < lifetime);
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn style(&self, level: NotificationLevel) -> (&'static str, Color) {
        match level {
            NotificationLevel::Success => (self.icons.success(), Color::Green),
            NotificationLevel::Info => (self.icons.info(), Color::Blue),
            NotificationLevel::Warning => (self.icons.warning(), Color::Yellow),
            NotificationLevel::Error => (self.icons.error(), Color::Red),
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let width = TOAST_WIDTH.min(area.width);
        let mut y = area.y + 1;

        for notification in self.items.iter().rev() {
            let (icon, color) = self.style(notification.level);
            let inner_width = width.saturating_sub(4).max(1) as usize;
            let text_len = notification.message.chars().count() + icon.chars().count() + 1;
            let height = (text_len.div_ceil(inner_width) as u16).clamp(1, 4) + 2;
            if y + height > area.bottom() {
                break;
            }

            let toast_area = Rect::new(area.right().saturating_sub(width + 1), y, width, height);
            f.render_widget(Clear, toast_area);
            let paragraph = Paragraph::new(Line::from(vec![
                Span::styled(format!("{} ", icon), Style::default().fg(color)),
                Span::styled(notification.message.clone(), Style::default().fg(Color::White)),
            ]))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .style(Style::default().fg(color)),
            )
            .wrap(Wrap { trim: true });
            f.render_widget(paragraph, toast_area);
            y += height;
        }
    }
}
