//! taskdesk - a terminal task-detail editor
//!
//! Browse tasks filtered by team and edit one at a time in a tabbed modal: details,
//! subtasks, comments and attachments. Edits are collected locally and sent to the backend
//! as a single snapshot.
//!
//! # Modules
//!
//! * [`backend`] - Backend trait, HTTP and in-memory implementations
//! * [`config`] - Application configuration management
//! * [`entities`] - Task, comment, attachment and reference records
//! * [`preview`] - Staged local copies of attached files
//! * [`ui`] - Terminal user interface components
//! * [`utils`] - Date and formatting helpers

/// Backend abstraction and implementations
pub mod backend;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and user-facing strings
pub mod constants;

/// Data records exchanged with the backend
pub mod entities;

/// Icon definitions for visual representation in the TUI
pub mod icons;

/// Logging setup and the in-memory log buffer
pub mod logger;

/// Preview copies of attachments
pub mod preview;

/// Terminal user interface components and rendering
pub mod ui;

/// Utility functions for date/time handling and other helpers
pub mod utils;

pub use entities::{Attachment, Comment, ListStatus, Priority, Tag, Task, TaskSnapshot, Team, User};
