use crate::icons::IconService;
use crate::logger::Logger;
use crate::ui::layout::LayoutManager;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
    Frame,
};

use crate::constants::DIALOG_TITLE_LOGS;

const PAGE_LINES: usize = 10;

/// Scroll position of the open dialog
#[derive(Debug, Default, Clone)]
pub struct DialogScroll {
    pub offset: usize,
    pub scrollbar: ScrollbarState,
}

impl DialogScroll {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn up(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    pub fn down(&mut self) {
        self.offset = self.offset.saturating_add(1);
    }

    pub fn page_up(&mut self) {
        self.offset = self.offset.saturating_sub(PAGE_LINES);
    }

    pub fn page_down(&mut self) {
        self.offset = self.offset.saturating_add(PAGE_LINES);
    }

    pub fn top(&mut self) {
        self.offset = 0;
    }

    /// Clamped to the content when rendered
    pub fn bottom(&mut self) {
        self.offset = usize::MAX;
    }

    /// Clamp the offset to the content and sync the scrollbar
    fn clamp(&mut self, total_lines: usize, visible_height: usize) -> usize {
        let max_scroll = total_lines.saturating_sub(visible_height);
        self.offset = self.offset.min(max_scroll);
        self.scrollbar = self
            .scrollbar
            .content_length(total_lines)
            .viewport_content_length(visible_height)
            .position(self.offset);
        self.offset
    }
}

fn render_scrollbar(f: &mut Frame, area: Rect, state: &mut ScrollbarState) {
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("↑"))
        .end_symbol(Some("↓"))
        .track_symbol(Some("│"))
        .thumb_symbol("▐")
        .style(Style::default().fg(Color::Gray))
        .thumb_style(Style::default().fg(Color::White));

    f.render_stateful_widget(scrollbar, area, state);
}

pub fn render_error_dialog(f: &mut Frame, area: Rect, icons: &IconService, message: &str, scroll: &mut DialogScroll) {
    let dialog_area = LayoutManager::centered_rect_lines(70, 12, area);
    f.render_widget(Clear, dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} Error ", icons.error()))
        .style(Style::default().fg(Color::Red));

    let content_area = Rect::new(
        dialog_area.x + 1,
        dialog_area.y + 1,
        dialog_area.width.saturating_sub(2),
        dialog_area.height.saturating_sub(4),
    );
    let instructions_area = Rect::new(
        dialog_area.x + 1,
        dialog_area.y + dialog_area.height.saturating_sub(2),
        dialog_area.width.saturating_sub(2),
        1,
    );

    let lines: Vec<&str> = message.lines().collect();
    let visible_height = content_area.height as usize;
    let offset = scroll.clamp(lines.len(), visible_height);
    let visible = lines.iter().skip(offset).take(visible_height).copied().collect::<Vec<_>>().join("\n");

    f.render_widget(block, dialog_area);
    f.render_widget(
        Paragraph::new(visible)
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: true }),
        content_area,
    );
    f.render_widget(
        Paragraph::new("Press Esc or Enter to close • j/k to scroll")
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center),
        instructions_area,
    );

    if lines.len() > visible_height {
        render_scrollbar(f, content_area, &mut scroll.scrollbar);
    }
}

const HELP_TEXT: &str = r"
TASK LIST
---------
j/k ↑↓      Move between tasks
Enter, e    Open the selected task
Tab         Switch between the team filter and the task list
r           Reload tasks

TEAM FILTER
-----------
j/k ↑↓      Move between teams
Enter       Filter tasks by the highlighted team

TASK EDITOR
-----------
PgUp/PgDn   Previous/next tab
Tab         Next field (Details), input/list (Subtasks, Attachments)
←/→         Change priority, assignee, team, status, dates and tags
t           Set the focused date to today
Enter       Add subtask, comment, tag or attachment
Ctrl+S      Save the task
Esc         Close without saving

SUBTASKS LIST
-------------
Space       Collapse or expand the list
←/→         Change the subtask status
Enter       Edit the selected subtask
d, Del      Remove the selected subtask

ATTACHMENTS LIST
----------------
Enter       Open the selected attachment
d, Del      Remove the selected attachment

GENERAL
-------
?           Toggle this help
G           Show logs
i           Change icon theme
q, Ctrl+C   Quit
";

pub fn render_help_dialog(f: &mut Frame, area: Rect, scroll: &mut DialogScroll) {
    let help_area = LayoutManager::centered_rect(80, 90, area);
    f.render_widget(Clear, help_area);

    let lines: Vec<&str> = HELP_TEXT.lines().collect();
    let visible_height = help_area.height.saturating_sub(2) as usize;
    let offset = scroll.clamp(lines.len(), visible_height);
    let visible = lines.iter().skip(offset).take(visible_height).copied().collect::<Vec<_>>().join("\n");

    let paragraph = Paragraph::new(visible)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help - Press 'Esc' or '?' to close ")
                .title_alignment(Alignment::Center),
        )
        .style(Style::default().fg(Color::White));
    f.render_widget(paragraph, help_area);

    if lines.len() > visible_height {
        render_scrollbar(f, help_area, &mut scroll.scrollbar);
    }
}

fn log_line_color(line: &str) -> Color {
    let level = line.split_once("] ").map_or(line, |(_, rest)| rest);
    if level.starts_with("ERROR") {
        Color::Red
    } else if level.starts_with("WARN") {
        Color::Yellow
    } else if level.starts_with("DEBUG") || level.starts_with("TRACE") {
        Color::DarkGray
    } else {
        Color::White
    }
}

/// Buffered log records, newest first
pub fn render_logs_dialog(f: &mut Frame, area: Rect, logger: &Logger, scroll: &mut DialogScroll) {
    let logs_area = LayoutManager::centered_rect(90, 90, area);
    f.render_widget(Clear, logs_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(DIALOG_TITLE_LOGS)
        .title_alignment(Alignment::Center);

    let logs = logger.get_logs();
    if logs.is_empty() {
        let empty = Paragraph::new("No logs yet")
            .block(block)
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center);
        f.render_widget(empty, logs_area);
        return;
    }

    let visible_height = logs_area.height.saturating_sub(2) as usize;
    let offset = scroll.clamp(logs.len(), visible_height);
    let lines: Vec<Line> = logs
        .iter()
        .skip(offset)
        .take(visible_height)
        .map(|log| Line::from(Span::styled(log.clone(), Style::default().fg(log_line_color(log)))))
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), logs_area);

    if logs.len() > visible_height {
        render_scrollbar(f, logs_area, &mut scroll.scrollbar);
    }
}
