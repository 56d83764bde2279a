//! Utility modules shared across the application.
//!
//! - [`datetime`] - Date parsing, stepping and display formatting
//! - [`format`] - File size formatting and file type guessing

pub mod datetime;
pub mod format;
