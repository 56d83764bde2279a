//! Reusable UI components

pub mod badge;
pub mod dialogs;
pub mod notifications;
pub mod status_bar;
pub mod task_list;
pub mod task_modal;
pub mod team_selector;
pub mod text_input;

pub use notifications::Notifications;
pub use status_bar::StatusBar;
pub use task_list::TaskListComponent;
pub use task_modal::{TaskEditor, TaskModal};
pub use team_selector::TeamSelector;
pub use text_input::TextInput;
