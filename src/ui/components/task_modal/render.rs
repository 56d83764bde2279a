use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

use super::editor::{FormField, ListFocus, Tab, TaskEditor};
use crate::config::DisplayConfig;
use crate::constants::{
    LOADING_SUBTASKS, PLACEHOLDER_ADD_TAG, PLACEHOLDER_ATTACH, PLACEHOLDER_COMMENT, PLACEHOLDER_DATE,
    PLACEHOLDER_DESCRIPTION, PLACEHOLDER_SELECT_ASSIGNEE, PLACEHOLDER_SELECT_STATUS, PLACEHOLDER_SUBTASK,
};
use crate::icons::IconService;
use crate::ui::components::dialogs::common::{
    create_dialog_block, create_field_paragraph, create_input_paragraph, create_instructions_paragraph, shortcuts,
    InstructionShortcut,
};
use crate::ui::components::text_input::TextInput;
use crate::ui::layout::LayoutManager;
use crate::utils::datetime::{format_human_date, format_timestamp};

impl TaskEditor {
    pub fn render(&self, f: &mut Frame, area: Rect, icons: &IconService, display: &DisplayConfig) {
        let dialog_area = LayoutManager::centered_rect(80, 85, area);
        f.render_widget(Clear, dialog_area);

        let title = if self.submitting {
            format!(" Edit Task #{} - saving... ", self.task.id)
        } else {
            format!(" Edit Task #{} ", self.task.id)
        };
        f.render_widget(create_dialog_block(&title, Color::Cyan), dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(dialog_area);

        self.render_tabs(f, chunks[0], icons);

        match self.tab {
            Tab::Details => self.render_details(f, chunks[2], icons, display),
            Tab::Subtasks => self.render_subtasks(f, chunks[2], icons),
            Tab::Comments => self.render_comments(f, chunks[2], icons, display),
            Tab::Attachments => self.render_attachments(f, chunks[2], icons, display),
        }

        self.render_errors(f, chunks[3]);
        f.render_widget(create_instructions_paragraph(&self.instructions()), chunks[4]);

        if let Some(nested) = &self.subtask_editor {
            nested.render(f, area, &self.reference, icons);
        }
    }

    fn render_tabs(&self, f: &mut Frame, area: Rect, icons: &IconService) {
        let ui = icons.icons().ui;
        let titles: Vec<Line> = Tab::ALL
            .iter()
            .map(|tab| {
                let (icon, count) = match tab {
                    Tab::Details => ("", None),
                    Tab::Subtasks => (ui.subtask, Some(self.subtasks.len())),
                    Tab::Comments => (ui.comment, Some(self.task.comments.len())),
                    Tab::Attachments => (ui.attachment, Some(self.task.attachments.len())),
                };
                let label = match count {
                    Some(n) => format!("{} {} ({})", icon, tab.title(), n),
                    None => tab.title().to_string(),
                };
                Line::from(label.trim_start().to_string())
            })
            .collect();

        let selected = Tab::ALL.iter().position(|t| *t == self.tab).unwrap_or(0);
        let tabs = Tabs::new(titles)
            .select(selected)
            .style(Style::default().fg(Color::Gray))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )
            .divider(" │ ");
        f.render_widget(tabs, area);
    }

    fn field_title(&self, field: FormField) -> String {
        match self.errors.get(field) {
            Some(err) => format!("{} - {}", field.label(), err),
            None => field.label().to_string(),
        }
    }

    fn field(&self, f: &mut Frame, area: Rect, field: FormField, value: String) {
        let focused = self.focus == field;
        let invalid = self.errors.get(field).is_some();
        f.render_widget(
            create_field_paragraph(value, &self.field_title(field), focused, invalid),
            area,
        );
    }

    fn render_details(&self, f: &mut Frame, area: Rect, icons: &IconService, display: &DisplayConfig) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);
        let thirds = |row: Rect| {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Ratio(1, 3),
                    Constraint::Ratio(1, 3),
                    Constraint::Ratio(1, 3),
                ])
                .split(row)
        };

        self.field(f, rows[0], FormField::Title, self.title_input.value().to_string());
        let description = if self.description_input.is_empty() && self.focus != FormField::Description {
            PLACEHOLDER_DESCRIPTION.to_string()
        } else {
            self.description_input.value().to_string()
        };
        self.field(f, rows[1], FormField::Description, description);

        let row = thirds(rows[2]);
        let priority = format!("‹ {} {} ›", icons.priority(self.task.priority), self.task.priority.label());
        self.field(f, row[0], FormField::Priority, priority);
        let assignee = match self.task.assigned_to.as_deref() {
            Some(id) => self.reference.user_name(Some(id)).to_string(),
            None => PLACEHOLDER_SELECT_ASSIGNEE.to_string(),
        };
        self.field(f, row[1], FormField::Assignee, format!("‹ {} ›", assignee));
        let team = self.reference.team_name(self.task.team_id.as_deref()).to_string();
        self.field(f, row[2], FormField::Team, format!("‹ {} {} ›", icons.icons().ui.team, team));

        let row = thirds(rows[3]);
        let status = self
            .reference
            .list_status_title(self.task.list_status_id.as_deref())
            .or(self.task.list_status.as_deref())
            .unwrap_or(PLACEHOLDER_SELECT_STATUS)
            .to_string();
        self.field(f, row[0], FormField::Status, format!("‹ {} ›", status));
        let date = |d: Option<chrono::NaiveDate>| match d {
            Some(d) => format!("{} ({})", d.format(&display.date_format), format_human_date(d)),
            None => PLACEHOLDER_DATE.to_string(),
        };
        self.field(f, row[1], FormField::StartDate, date(self.task.start_date));
        self.field(
            f,
            row[2],
            FormField::DueDate,
            format!("{} {}", icons.icons().due_date, date(self.task.due_date)),
        );

        let row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3), Constraint::Ratio(2, 3)])
            .split(rows[4]);
        let estimate = if self.estimate_input.is_empty() {
            "-".to_string()
        } else {
            format!("{} {}", icons.icons().estimate, self.estimate_input.value())
        };
        self.field(f, row[0], FormField::Estimate, estimate);
        self.field(f, row[1], FormField::Tags, self.tags_line(icons));

        let assigned_by = self.reference.user_name(self.task.assigned_by.as_deref());
        let info = Line::from(vec![
            Span::styled("Assigned by ", Style::default().fg(Color::DarkGray)),
            Span::styled(assigned_by.to_string(), Style::default().fg(Color::Gray)),
        ]);
        f.render_widget(Paragraph::new(info), rows[5]);

        match self.focus {
            FormField::Title => set_input_cursor(f, rows[0], &self.title_input),
            FormField::Description => set_input_cursor(f, rows[1], &self.description_input),
            FormField::Estimate => {
                let offset = icons.icons().estimate.chars().count() as u16 + 1;
                f.set_cursor_position((
                    row[0].x + 1 + offset + self.estimate_input.cursor() as u16,
                    row[0].y + 1,
                ));
            }
            _ => {}
        }
    }

    fn tags_line(&self, icons: &IconService) -> String {
        let mut parts: Vec<String> = self
            .task
            .tags
            .iter()
            .map(|t| format!("[{} {}]", icons.icons().ui.tag, t.title))
            .collect();
        let candidate = match self.tag_candidate() {
            Some(tag) => format!("+ ‹ {} ›", tag.title),
            None if self.available_tags().is_empty() => String::new(),
            None => format!("+ {}", PLACEHOLDER_ADD_TAG),
        };
        if self.focus == FormField::Tags || parts.is_empty() {
            parts.push(if candidate.is_empty() {
                PLACEHOLDER_ADD_TAG.to_string()
            } else {
                candidate
            });
        }
        parts.join(" ")
    }

    fn render_subtasks(&self, f: &mut Frame, area: Rect, icons: &IconService) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let marker = if self.subtasks_collapsed {
            icons.icons().collapsed
        } else {
            icons.icons().expanded
        };
        let mut header = vec![Span::styled(
            format!("{} Subtasks ({})", marker, self.subtasks.len()),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        if self.subtasks_loading {
            header.push(Span::styled(
                format!("  {}", LOADING_SUBTASKS),
                Style::default().fg(Color::DarkGray),
            ));
        }
        f.render_widget(Paragraph::new(Line::from(header)), chunks[0]);

        let input_focused = self.list_focus == ListFocus::Input;
        f.render_widget(
            create_input_paragraph(self.subtask_input.value(), PLACEHOLDER_SUBTASK, "New subtask", input_focused),
            chunks[1],
        );
        if input_focused {
            set_input_cursor(f, chunks[1], &self.subtask_input);
        }

        if self.subtasks_collapsed {
            return;
        }

        let items: Vec<ListItem> = self
            .subtasks
            .iter()
            .map(|subtask| {
                let status = self
                    .reference
                    .list_status_title(subtask.list_status_id.as_deref())
                    .or(subtask.list_status.as_deref())
                    .unwrap_or("-");
                let assignee = self.reference.user_name(subtask.assigned_to.as_deref());
                ListItem::new(Line::from(vec![
                    Span::styled(format!("‹ {:<12} › ", status), Style::default().fg(Color::Cyan)),
                    Span::raw(subtask.title.clone()),
                    Span::styled(format!("  {}", assignee), Style::default().fg(Color::DarkGray)),
                ]))
            })
            .collect();

        let mut state = ListState::default();
        if self.list_focus == ListFocus::List && !self.subtasks.is_empty() {
            state.select(Some(self.subtask_cursor));
        }
        let list = List::new(items).highlight_style(Style::default().bg(Color::Blue).fg(Color::White));
        f.render_stateful_widget(list, chunks[2], &mut state);
    }

    fn render_comments(&self, f: &mut Frame, area: Rect, icons: &IconService, display: &DisplayConfig) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(area);

        let mut lines: Vec<Line> = Vec::new();
        for comment in &self.task.comments {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{} {}", icons.icons().ui.comment, comment.comment_by),
                    Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", format_timestamp(&comment.created_at, &display.datetime_format)),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
            lines.push(Line::from(format!("  {}", comment.comment)));
        }
        if lines.is_empty() {
            lines.push(Line::from(Span::styled("No comments yet", Style::default().fg(Color::DarkGray))));
        }

        // Keep the newest comments in view
        let overflow = lines.len().saturating_sub(chunks[0].height as usize);
        let paragraph = Paragraph::new(lines.split_off(overflow)).wrap(Wrap { trim: false });
        f.render_widget(paragraph, chunks[0]);

        f.render_widget(
            create_input_paragraph(self.comment_input.value(), PLACEHOLDER_COMMENT, "Comment", true),
            chunks[1],
        );
        set_input_cursor(f, chunks[1], &self.comment_input);
    }

    fn render_attachments(&self, f: &mut Frame, area: Rect, icons: &IconService, display: &DisplayConfig) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let input_focused = self.list_focus == ListFocus::Input;
        f.render_widget(
            create_input_paragraph(self.attach_input.value(), PLACEHOLDER_ATTACH, "Attach files", input_focused),
            chunks[0],
        );
        if input_focused {
            set_input_cursor(f, chunks[0], &self.attach_input);
        }

        if self.task.attachments.is_empty() {
            let empty = Paragraph::new(Span::styled("No attachments", Style::default().fg(Color::DarkGray)));
            f.render_widget(empty, chunks[1]);
            return;
        }

        let items: Vec<ListItem> = self
            .task
            .attachments
            .iter()
            .map(|attachment| {
                let uploader = self.reference.user_name(attachment.uploaded_by.as_deref());
                ListItem::new(vec![
                    Line::from(vec![
                        Span::raw(format!("{} ", icons.file_icon(&attachment.file_type))),
                        Span::styled(attachment.file_name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                        Span::styled(format!("  {}", attachment.file_size), Style::default().fg(Color::Gray)),
                    ]),
                    Line::from(Span::styled(
                        format!(
                            "   {} · {}",
                            uploader,
                            format_timestamp(&attachment.uploaded_at, &display.datetime_format)
                        ),
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
            })
            .collect();

        let mut state = ListState::default();
        if self.list_focus == ListFocus::List {
            state.select(Some(self.attachment_cursor));
        }
        let list = List::new(items).highlight_style(Style::default().bg(Color::Blue).fg(Color::White));
        f.render_stateful_widget(list, chunks[1], &mut state);
    }

    fn render_errors(&self, f: &mut Frame, area: Rect) {
        let messages: Vec<&str> = FormField::DETAILS.iter().filter_map(|field| self.errors.get(*field)).collect();
        if messages.is_empty() {
            return;
        }
        let line = Paragraph::new(messages.join(" • ")).style(Style::default().fg(Color::Red));
        f.render_widget(line, area);
    }

    fn instructions(&self) -> Vec<InstructionShortcut> {
        let mut list = vec![shortcuts::CTRL_S_SUBMIT, shortcuts::SEPARATOR, shortcuts::PAGE_TABS, shortcuts::SEPARATOR];
        match (self.tab, self.list_focus) {
            (Tab::Details, _) => {
                list.extend([shortcuts::TAB_NEXT_FIELD, shortcuts::SEPARATOR, shortcuts::ARROWS_CHANGE]);
            }
            (Tab::Comments, _) => list.push(("Enter", Color::Green, " Add comment")),
            (Tab::Subtasks, ListFocus::Input) => {
                list.extend([("Enter", Color::Green, " Add"), shortcuts::SEPARATOR, ("Tab", Color::Cyan, " List")]);
            }
            (Tab::Subtasks, ListFocus::List) => {
                list.extend([
                    ("Enter", Color::Green, " Edit"),
                    shortcuts::SEPARATOR,
                    ("←/→", Color::Yellow, " Status"),
                    shortcuts::SEPARATOR,
                    ("d", Color::Red, " Remove"),
                    shortcuts::SEPARATOR,
                    ("Space", Color::Cyan, " Collapse"),
                ]);
            }
            (Tab::Attachments, ListFocus::Input) => {
                list.extend([("Enter", Color::Green, " Attach"), shortcuts::SEPARATOR, ("Tab", Color::Cyan, " List")]);
            }
            (Tab::Attachments, ListFocus::List) => {
                list.extend([("Enter", Color::Green, " Open"), shortcuts::SEPARATOR, ("d", Color::Red, " Remove")]);
            }
        }
        list.extend([shortcuts::SEPARATOR, shortcuts::ESC_CANCEL]);
        list
    }
}

fn set_input_cursor(f: &mut Frame, area: Rect, input: &TextInput) {
    let x = (area.x + 1 + input.cursor() as u16).min(area.right().saturating_sub(2));
    f.set_cursor_position((x, area.y + 1));
}
