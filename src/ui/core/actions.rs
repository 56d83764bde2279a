use crate::backend::ReferenceData;
use crate::entities::{Task, TaskSnapshot, Team};

/// Severity of a toast notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    NextTask,
    PreviousTask,
    FocusNextPane,

    // Reference data
    LoadReferenceData,
    ReferenceDataLoaded(Box<ReferenceData>),
    ReferenceDataFailed(String),

    // Team selector
    FetchTeams,
    TeamsLoaded(Vec<Team>),
    TeamsFailed(String),
    /// `None` is the "Select Team" entry
    TeamSelected(Option<String>),

    // Task modal
    OpenTask(String),
    SubtasksLoaded {
        parent_id: String,
        subtasks: Vec<Task>,
    },
    SubtasksFailed {
        parent_id: String,
        error: String,
    },
    SubmitTask(Box<TaskSnapshot>),
    TaskUpdated(Box<TaskSnapshot>),
    TaskUpdateFailed {
        task_id: String,
        error: String,
    },
    CloseTaskModal,
    OpenAttachment(String),

    // UI operations
    Notify(NotificationLevel, String),
    ShowDialog(DialogType),
    HideDialog,
    CycleIconTheme,

    // App control
    Quit,
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DialogType {
    Error(String),
    Help,
    Logs,
}
