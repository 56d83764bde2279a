//! Core UI functionality for taskdesk.
//!
//! # Module Components
//!
//! - [`actions`] - Action definitions routed between components
//! - [`component`] - Base component trait
//! - [`context`] - Services and shared data owned by the application
//! - [`event_handler`] - Terminal input polling
//! - [`task_manager`] - Background backend calls reporting back as actions
//!
//! Components turn key events into [`Action`]s. The application routes them, spawning
//! backend work through the [`TaskManager`] whose results come back on a channel as
//! further actions.

pub mod actions;
pub mod component;
pub mod context;
pub mod event_handler;
pub mod task_manager;

pub use actions::{Action, DialogType, NotificationLevel};
pub use component::Component;
pub use context::AppContext;
pub use event_handler::{EventHandler, EventType};
pub use task_manager::{TaskId, TaskManager};
