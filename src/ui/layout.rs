//! Layout calculations

use crate::constants::FILTER_PANE_WIDTH;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct LayoutManager;

impl LayoutManager {
    /// Content area on top, one-line status bar below
    #[must_use]
    pub fn main_layout(area: Rect) -> (Rect, Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);
        (chunks[0], chunks[1])
    }

    /// Team filter on the left (at most a third of the width), task list on the right
    #[must_use]
    pub fn content_layout(area: Rect) -> (Rect, Rect) {
        let filter_width = FILTER_PANE_WIDTH.min(area.width / 3);
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(filter_width), Constraint::Min(0)])
            .split(area);
        (chunks[0], chunks[1])
    }

    /// Calculate a centered rectangle within the given area
    #[must_use]
    pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
        let popup_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ])
            .split(r);

        Self::centered_columns(percent_x, popup_layout[1])
    }

    /// Calculate a centered rectangle with percentage width and fixed line height
    #[must_use]
    pub fn centered_rect_lines(percent_x: u16, height_lines: u16, r: Rect) -> Rect {
        let popup_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(height_lines.min(r.height)),
                Constraint::Min(0),
            ])
            .split(r);

        Self::centered_columns(percent_x, popup_layout[1])
    }

    fn centered_columns(percent_x: u16, row: Rect) -> Rect {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(row)[1]
    }
}
