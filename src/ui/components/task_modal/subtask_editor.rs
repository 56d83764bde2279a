//! Nested editor for one subtask, opened from the Subtasks tab.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Color,
    widgets::Clear,
    Frame,
};

use super::editor::cycle_option;
use crate::backend::ReferenceData;
use crate::constants::{PLACEHOLDER_SELECT_STATUS, VALIDATION_TITLE_REQUIRED};
use crate::entities::Task;
use crate::icons::IconService;
use crate::ui::components::dialogs::common::{
    create_dialog_block, create_field_paragraph, create_instructions_paragraph, shortcuts,
};
use crate::ui::components::text_input::TextInput;
use crate::ui::layout::LayoutManager;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubtaskField {
    Title,
    Description,
    Status,
    Priority,
    Assignee,
}

impl SubtaskField {
    const ORDER: [SubtaskField; 5] = [
        SubtaskField::Title,
        SubtaskField::Description,
        SubtaskField::Status,
        SubtaskField::Priority,
        SubtaskField::Assignee,
    ];

    fn step(self, forward: bool) -> Self {
        let len = Self::ORDER.len();
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        if forward {
            Self::ORDER[(i + 1) % len]
        } else {
            Self::ORDER[(i + len - 1) % len]
        }
    }
}

/// What a key did to the nested editor
#[derive(Debug, Clone, PartialEq)]
pub enum SubtaskOutcome {
    Continue,
    Save(Task),
    Cancel,
}

#[derive(Debug, Clone)]
pub struct SubtaskEditor {
    subtask: Task,
    parent_title: String,
    focus: SubtaskField,
    title_input: TextInput,
    description_input: TextInput,
    error: Option<String>,
}

impl SubtaskEditor {
    pub fn new(subtask: &Task, parent: &Task) -> Self {
        Self {
            subtask: subtask.clone(),
            parent_title: parent.title.clone(),
            focus: SubtaskField::Title,
            title_input: TextInput::with_value(subtask.title.clone()),
            description_input: TextInput::with_value(subtask.description.clone()),
            error: None,
        }
    }

    pub fn subtask(&self) -> &Task {
        &self.subtask
    }

    pub fn focus(&self) -> SubtaskField {
        self.focus
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The edited subtask, or `None` with an error recorded when the title is blank
    pub fn save(&mut self) -> Option<Task> {
        if self.subtask.title.trim().is_empty() {
            self.error = Some(VALIDATION_TITLE_REQUIRED.to_string());
            return None;
        }
        Some(self.subtask.clone())
    }

    pub fn handle_key(&mut self, key: KeyEvent, reference: &ReferenceData) -> SubtaskOutcome {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
            return self.save().map_or(SubtaskOutcome::Continue, SubtaskOutcome::Save);
        }

        match key.code {
            KeyCode::Esc => return SubtaskOutcome::Cancel,
            KeyCode::Enter => return self.save().map_or(SubtaskOutcome::Continue, SubtaskOutcome::Save),
            KeyCode::Tab => {
                self.focus = self.focus.step(true);
                return SubtaskOutcome::Continue;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.step(false);
                return SubtaskOutcome::Continue;
            }
            _ => {}
        }

        let forward = match key.code {
            KeyCode::Right => Some(true),
            KeyCode::Left => Some(false),
            _ => None,
        };

        match self.focus {
            SubtaskField::Title => {
                if self.title_input.handle_key(key) {
                    self.subtask.title = self.title_input.value().to_string();
                    self.error = None;
                }
            }
            SubtaskField::Description => {
                if self.description_input.handle_key(key) {
                    self.subtask.description = self.description_input.value().to_string();
                }
            }
            SubtaskField::Status => {
                if let Some(forward) = forward {
                    let ids: Vec<&str> = reference.list_statuses.iter().map(|s| s.id.as_str()).collect();
                    let next = cycle_option(self.subtask.list_status_id.as_deref(), &ids, forward);
                    self.subtask.list_status = reference.list_status_title(next.as_deref()).map(str::to_string);
                    self.subtask.list_status_id = next;
                }
            }
            SubtaskField::Priority => match forward {
                Some(true) => self.subtask.priority = self.subtask.priority.next(),
                Some(false) => self.subtask.priority = self.subtask.priority.previous(),
                None => {}
            },
            SubtaskField::Assignee => {
                if let Some(forward) = forward {
                    let ids: Vec<&str> = reference.users.iter().map(|u| u.id.as_str()).collect();
                    self.subtask.assigned_to = cycle_option(self.subtask.assigned_to.as_deref(), &ids, forward);
                }
            }
        }
        SubtaskOutcome::Continue
    }

    pub fn render(&self, f: &mut Frame, area: Rect, reference: &ReferenceData, icons: &IconService) {
        let dialog_area = LayoutManager::centered_rect_lines(60, 19, area);
        f.render_widget(Clear, dialog_area);

        let title = format!(" {} Subtask of {} ", icons.icons().ui.subtask, self.parent_title);
        f.render_widget(create_dialog_block(&title, Color::Cyan), dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(1),
            ])
            .split(dialog_area);

        let status = reference
            .list_status_title(self.subtask.list_status_id.as_deref())
            .unwrap_or(PLACEHOLDER_SELECT_STATUS)
            .to_string();
        let assignee = reference.user_name(self.subtask.assigned_to.as_deref()).to_string();
        let priority = format!(
            "{} {}",
            icons.priority(self.subtask.priority),
            self.subtask.priority.label()
        );

        let title_label = match &self.error {
            Some(err) => format!("Title - {}", err),
            None => "Title".to_string(),
        };
        let fields = [
            (SubtaskField::Title, title_label, self.title_input.value().to_string()),
            (
                SubtaskField::Description,
                "Description".to_string(),
                self.description_input.value().to_string(),
            ),
            (SubtaskField::Status, "Status".to_string(), format!("‹ {} ›", status)),
            (SubtaskField::Priority, "Priority".to_string(), format!("‹ {} ›", priority)),
            (SubtaskField::Assignee, "Assignee".to_string(), format!("‹ {} ›", assignee)),
        ];

        for (i, (field, label, value)) in fields.into_iter().enumerate() {
            let focused = self.focus == field;
            let invalid = field == SubtaskField::Title && self.error.is_some();
            f.render_widget(create_field_paragraph(value, &label, focused, invalid), chunks[i]);
        }

        let cursor_input = match self.focus {
            SubtaskField::Title => Some(&self.title_input),
            SubtaskField::Description => Some(&self.description_input),
            _ => None,
        };
        if let Some(input) = cursor_input {
            let row = if self.focus == SubtaskField::Title { chunks[0] } else { chunks[1] };
            f.set_cursor_position((row.x + 1 + input.cursor() as u16, row.y + 1));
        }

        let instructions = create_instructions_paragraph(&[
            shortcuts::ENTER_SAVE,
            shortcuts::SEPARATOR,
            shortcuts::TAB_NEXT_FIELD,
            shortcuts::SEPARATOR,
            shortcuts::ARROWS_CHANGE,
            shortcuts::SEPARATOR,
            shortcuts::ESC_CANCEL,
        ]);
        f.render_widget(instructions, chunks[6]);
    }
}

