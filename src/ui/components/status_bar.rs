//! One-line status bar under the panes

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

pub struct StatusBar;

impl StatusBar {
    /// `pending` is the number of backend calls still in flight
    pub fn render(f: &mut Frame, area: Rect, pending: usize, modal_open: bool) {
        let (text, color) = if pending > 0 {
            (format!("⟳ Waiting on {} request(s)...", pending), Color::Yellow)
        } else if modal_open {
            (
                "Ctrl+S: save • PgUp/PgDn: tabs • Esc: close • ?: help".to_string(),
                Color::Gray,
            )
        } else {
            (
                "Enter: open task • Tab: switch pane • r: reload • G: logs • ?: help • q: quit".to_string(),
                Color::Gray,
            )
        };

        let status_bar = Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(Style::default().fg(color));
        f.render_widget(status_bar, area);
    }
}
