//! Tabbed task editor shown over the task list.
//!
//! The modal is either closed or holds one [`TaskEditor`] session. All four tabs read
//! and write the same session, so moving between them never loses edits.

mod editor;
mod keys;
mod render;
mod subtask_editor;

pub use editor::{AttachOutcome, FieldErrors, FormField, ListFocus, SessionIdentity, Tab, TaskEditor};
pub use subtask_editor::{SubtaskEditor, SubtaskField, SubtaskOutcome};

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use crate::config::DisplayConfig;
use crate::icons::IconService;
use crate::ui::core::{Action, Component};

#[derive(Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open(Box<TaskEditor>),
}

pub struct TaskModal {
    pub state: ModalState,
    pub icons: IconService,
    pub display: DisplayConfig,
}

impl Default for TaskModal {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskModal {
    pub fn new() -> Self {
        Self {
            state: ModalState::Closed,
            icons: IconService::default(),
            display: DisplayConfig::default(),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open(_))
    }

    /// Start a session, ending any previous one
    pub fn open(&mut self, editor: TaskEditor) {
        self.close();
        self.state = ModalState::Open(Box::new(editor));
    }

    /// End the session, releasing its previews
    pub fn close(&mut self) {
        if let ModalState::Open(editor) = std::mem::take(&mut self.state) {
            log::debug!("Closing editor for task {}", editor.task_id());
            editor.close();
        }
    }

    pub fn editor(&self) -> Option<&TaskEditor> {
        match &self.state {
            ModalState::Open(editor) => Some(&**editor),
            ModalState::Closed => None,
        }
    }

    pub fn editor_mut(&mut self) -> Option<&mut TaskEditor> {
        match &mut self.state {
            ModalState::Open(editor) => Some(&mut **editor),
            ModalState::Closed => None,
        }
    }

    /// The open session, if it is editing `task_id`
    fn editor_for(&mut self, task_id: &str) -> Option<&mut TaskEditor> {
        self.editor_mut().filter(|editor| editor.task_id() == task_id)
    }
}

impl Component for TaskModal {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match self.editor_mut() {
            Some(editor) => editor.handle_key_events(key),
            None => Action::None,
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match action {
            Action::SubtasksLoaded { parent_id, subtasks } => {
                if let Some(editor) = self.editor_for(&parent_id) {
                    log::debug!("Loaded {} subtasks for task {}", subtasks.len(), parent_id);
                    editor.seed_subtasks(subtasks);
                }
                Action::None
            }
            Action::SubtasksFailed { parent_id, error } => {
                log::error!("Failed to load subtasks for task {}: {}", parent_id, error);
                if let Some(editor) = self.editor_for(&parent_id) {
                    editor.subtask_load_failed();
                }
                Action::None
            }
            Action::TaskUpdated(snapshot) => {
                if self.editor().is_some_and(|e| e.task_id() == snapshot.task.id) {
                    self.close();
                }
                Action::None
            }
            Action::TaskUpdateFailed { task_id, .. } => {
                if let Some(editor) = self.editor_for(&task_id) {
                    editor.submit_failed();
                }
                Action::None
            }
            Action::CloseTaskModal => {
                self.close();
                Action::None
            }
            other => other,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        if let ModalState::Open(editor) = &self.state {
            editor.render(f, rect, &self.icons, &self.display);
        }
    }
}

impl Drop for TaskModal {
    fn drop(&mut self) {
        self.close();
    }
}
