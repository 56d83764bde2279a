//! Dialog rendering shared by the application and the task modal

pub mod common;
mod system_dialogs;

pub use system_dialogs::{render_error_dialog, render_help_dialog, render_logs_dialog, DialogScroll};
