//! Key bindings of the task modal.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::editor::{FormField, ListFocus, Tab, TaskEditor};
use super::subtask_editor::SubtaskOutcome;
use crate::constants::ERROR_ATTACHMENT_UNREADABLE;
use crate::ui::core::{Action, NotificationLevel};
use crate::utils::datetime::today;

impl TaskEditor {
    pub fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if let Some(nested) = self.subtask_editor.as_mut() {
            match nested.handle_key(key, &self.reference) {
                SubtaskOutcome::Continue => {}
                SubtaskOutcome::Save(subtask) => {
                    self.save_subtask(subtask);
                    self.close_subtask_editor();
                }
                SubtaskOutcome::Cancel => self.close_subtask_editor(),
            }
            return Action::None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
            return match self.begin_submit() {
                Some(snapshot) => Action::SubmitTask(Box::new(snapshot)),
                None => Action::None,
            };
        }

        match key.code {
            KeyCode::Esc => return Action::CloseTaskModal,
            KeyCode::PageDown => {
                self.next_tab();
                return Action::None;
            }
            KeyCode::PageUp => {
                self.previous_tab();
                return Action::None;
            }
            _ => {}
        }

        match self.tab {
            Tab::Details => self.handle_details_key(key),
            Tab::Subtasks => self.handle_subtasks_key(key),
            Tab::Comments => self.handle_comments_key(key),
            Tab::Attachments => self.handle_attachments_key(key),
        }
    }

    fn toggle_list_focus(&mut self) {
        self.list_focus = match self.list_focus {
            ListFocus::Input => ListFocus::List,
            ListFocus::List => ListFocus::Input,
        };
    }

    fn handle_details_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return Action::None;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.previous();
                return Action::None;
            }
            _ => {}
        }

        let forward = match key.code {
            KeyCode::Right => Some(true),
            KeyCode::Left => Some(false),
            _ => None,
        };

        match self.focus {
            FormField::Title => {
                if key.code == KeyCode::Enter {
                    self.focus = self.focus.next();
                } else if self.title_input.handle_key(key) {
                    self.sync_title();
                }
            }
            FormField::Description => {
                if key.code == KeyCode::Enter {
                    self.focus = self.focus.next();
                } else if self.description_input.handle_key(key) {
                    self.sync_description();
                }
            }
            FormField::Priority => match forward {
                Some(true) => self.set_priority(self.task.priority.next()),
                Some(false) => self.set_priority(self.task.priority.previous()),
                None => {}
            },
            FormField::Assignee => {
                if let Some(forward) = forward {
                    self.cycle_assignee(forward);
                }
            }
            FormField::Team => {
                if let Some(forward) = forward {
                    self.cycle_team(forward);
                }
            }
            FormField::Status => {
                if let Some(forward) = forward {
                    self.cycle_status(forward);
                }
            }
            FormField::StartDate | FormField::DueDate => {
                let start = self.focus == FormField::StartDate;
                match key.code {
                    KeyCode::Right | KeyCode::Left => {
                        let days = if key.code == KeyCode::Right { 1 } else { -1 };
                        if start {
                            self.step_start_date(days);
                        } else {
                            self.step_due_date(days);
                        }
                    }
                    KeyCode::Char('t') => {
                        if start {
                            self.set_start_date(Some(today()));
                        } else {
                            self.set_due_date(Some(today()));
                        }
                    }
                    KeyCode::Backspace | KeyCode::Delete => {
                        if start {
                            self.set_start_date(None);
                        } else {
                            self.set_due_date(None);
                        }
                    }
                    _ => {}
                }
            }
            FormField::Estimate => {
                let accepted = match key.code {
                    KeyCode::Char(c) => c.is_ascii_digit(),
                    _ => true,
                };
                if accepted && self.estimate_input.handle_key(key) && !self.sync_estimate() {
                    // Too many digits for u32 minutes
                    self.estimate_input.backspace();
                    self.sync_estimate();
                }
            }
            FormField::Tags => match key.code {
                KeyCode::Right => self.cycle_tag_candidate(true),
                KeyCode::Left => self.cycle_tag_candidate(false),
                KeyCode::Enter => {
                    if let Some(tag_id) = self.tag_candidate().map(|t| t.id.clone()) {
                        self.add_tag(&tag_id);
                    }
                }
                KeyCode::Backspace | KeyCode::Delete => {
                    if let Some(tag_id) = self.task.tags.last().map(|t| t.id.clone()) {
                        self.remove_tag(&tag_id);
                    }
                }
                _ => {}
            },
        }
        Action::None
    }

    fn handle_subtasks_key(&mut self, key: KeyEvent) -> Action {
        if matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
            self.toggle_list_focus();
            return Action::None;
        }

        match self.list_focus {
            ListFocus::Input => {
                if key.code == KeyCode::Enter {
                    if let Some(title) = self.add_subtask().map(|t| t.title.clone()) {
                        log::debug!("Added subtask '{}' to task {}", title, self.task.id);
                    }
                } else {
                    self.subtask_input.handle_key(key);
                }
            }
            ListFocus::List => {
                if key.code == KeyCode::Char(' ') {
                    self.toggle_subtasks_collapsed();
                    return Action::None;
                }
                if self.subtasks_collapsed {
                    return Action::None;
                }
                let selected = self.selected_subtask().map(|t| t.id.clone());
                match key.code {
                    KeyCode::Up | KeyCode::Char('k') => self.move_subtask_cursor(false),
                    KeyCode::Down | KeyCode::Char('j') => self.move_subtask_cursor(true),
                    KeyCode::Right | KeyCode::Left => {
                        if let Some(id) = selected {
                            self.cycle_subtask_status(&id, key.code == KeyCode::Right);
                        }
                    }
                    KeyCode::Enter => {
                        if let Some(id) = selected {
                            self.open_subtask(&id);
                        }
                    }
                    KeyCode::Char('d') | KeyCode::Delete => {
                        if let Some(id) = selected {
                            self.remove_subtask(&id);
                        }
                    }
                    _ => {}
                }
            }
        }
        Action::None
    }

    fn handle_comments_key(&mut self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Enter {
            self.add_comment();
        } else {
            self.comment_input.handle_key(key);
        }
        Action::None
    }

    fn handle_attachments_key(&mut self, key: KeyEvent) -> Action {
        if matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
            self.toggle_list_focus();
            return Action::None;
        }

        match self.list_focus {
            ListFocus::Input => {
                if key.code != KeyCode::Enter {
                    self.attach_input.handle_key(key);
                    return Action::None;
                }
                let outcome = self.attach_from_input();
                if outcome.skipped.is_empty() {
                    return Action::None;
                }
                let names: Vec<String> = outcome
                    .skipped
                    .iter()
                    .map(|(path, reason)| format!("{} ({})", path.display(), reason))
                    .collect();
                Action::Notify(
                    NotificationLevel::Warning,
                    format!("{}: {}", ERROR_ATTACHMENT_UNREADABLE, names.join(", ")),
                )
            }
            ListFocus::List => {
                let selected = self.selected_attachment().map(|a| a.id.clone());
                match key.code {
                    KeyCode::Up | KeyCode::Char('k') => self.move_attachment_cursor(false),
                    KeyCode::Down | KeyCode::Char('j') => self.move_attachment_cursor(true),
                    KeyCode::Enter => {
                        if let Some(target) = selected.and_then(|id| self.preview_target(&id)) {
                            return Action::OpenAttachment(target);
                        }
                    }
                    KeyCode::Char('d') | KeyCode::Delete => {
                        if let Some(id) = selected {
                            self.remove_attachment(&id);
                        }
                    }
                    _ => {}
                }
                Action::None
            }
        }
    }
}
