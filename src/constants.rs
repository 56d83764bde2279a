//! Constants used throughout the application
//!
//! This module centralizes magic strings, UI text, and other constant values
//! to improve maintainability and consistency.

// Notifications
pub const SUCCESS_TASK_UPDATED: &str = "Task updated successfully";
pub const ERROR_TASK_UPDATE_FAILED: &str = "Failed to update task";
pub const ERROR_ATTACHMENT_UNREADABLE: &str = "Could not attach";
pub const ERROR_OPEN_PREVIEW_FAILED: &str = "Could not open attachment";
pub const ERROR_REFERENCE_LOAD_FAILED: &str = "Failed to load tasks";

// Validation messages
pub const VALIDATION_TITLE_REQUIRED: &str = "Title is required";
pub const VALIDATION_ASSIGNEE_REQUIRED: &str = "Assignee is required";
pub const VALIDATION_STATUS_REQUIRED: &str = "Status is required";

// Fallback display names
pub const UNASSIGNED_USER: &str = "Unassigned";
pub const NO_TEAM: &str = "No Team";

// Placeholders
pub const PLACEHOLDER_SELECT_TEAM: &str = "Select Team";
pub const PLACEHOLDER_SELECT_ASSIGNEE: &str = "Select Assignee";
pub const PLACEHOLDER_SELECT_STATUS: &str = "Select Status";
pub const PLACEHOLDER_ADD_TAG: &str = "Add a tag...";
pub const PLACEHOLDER_DESCRIPTION: &str = "Add description...";
pub const PLACEHOLDER_COMMENT: &str = "Write a comment...";
pub const PLACEHOLDER_SUBTASK: &str = "Add a subtask...";
pub const PLACEHOLDER_ATTACH: &str = "Paths to attach, separated by commas";
pub const PLACEHOLDER_DATE: &str = "No date";

// Log messages
pub const LOG_FETCHED_TEAMS: &str = "Fetched teams";
pub const LOG_ERROR_FETCH_TEAMS: &str = "Error fetching teams";

// UI messages
pub const CONFIG_GENERATED: &str = "Generated default configuration file";
pub const DIALOG_TITLE_LOGS: &str = " Logs - Press 'Esc', 'G' or 'q' to close ";
pub const LOADING_TEAMS: &str = "Loading teams...";
pub const LOADING_TASKS: &str = "Loading tasks...";
pub const LOADING_SUBTASKS: &str = "Loading subtasks...";

// Layout and limits
/// Width of the left pane (team filter) in columns
pub const FILTER_PANE_WIDTH: u16 = 28;
/// Bounds for `display.notification_seconds`
pub const NOTIFICATION_MIN_SECONDS: u64 = 1;
pub const NOTIFICATION_MAX_SECONDS: u64 = 60;
/// Upper bound for `api.request_timeout_secs`
pub const REQUEST_TIMEOUT_MAX_SECONDS: u64 = 600;
