//! Backend abstraction layer.
//!
//! This module defines the interface the UI uses to read reference data and to
//! push edited tasks, along with the common error type. Two implementations ship:
//! [`http::HttpBackend`] for a REST task server and [`memory::MemoryBackend`] for a
//! local dataset.

use async_trait::async_trait;

use crate::constants::{NO_TEAM, UNASSIGNED_USER};
use crate::entities::{ListStatus, Tag, Task, TaskSnapshot, Team, User};

pub mod factory;
pub mod http;
pub mod memory;

pub use factory::create_backend;

/// Common error types for backend operations.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Backend error: {0}")]
    Other(String),
}

/// Backend trait that all task sources must implement.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Returns the backend type identifier (e.g., "http", "memory").
    fn backend_type(&self) -> &str;

    // Reference collections
    async fn fetch_teams(&self) -> Result<Vec<Team>, BackendError>;
    async fn fetch_users(&self) -> Result<Vec<User>, BackendError>;
    async fn fetch_tags(&self) -> Result<Vec<Tag>, BackendError>;
    async fn fetch_list_statuses(&self) -> Result<Vec<ListStatus>, BackendError>;

    /// All tasks, top-level and subtasks alike.
    async fn fetch_tasks(&self) -> Result<Vec<Task>, BackendError>;

    /// Direct children of `parent_id`, in server order.
    async fn list_subtasks(&self, parent_id: &str) -> Result<Vec<Task>, BackendError>;

    /// Store an edited task together with its edited subtask list.
    async fn update_task(&self, snapshot: &TaskSnapshot) -> Result<(), BackendError>;
}

/// Read-only collections the editor resolves identifiers against.
#[derive(Clone, Debug, Default)]
pub struct ReferenceData {
    pub users: Vec<User>,
    pub teams: Vec<Team>,
    pub tags: Vec<Tag>,
    pub list_statuses: Vec<ListStatus>,
    pub tasks: Vec<Task>,
}

impl ReferenceData {
    /// Fetch every reference collection concurrently.
    pub async fn load(backend: &dyn Backend) -> Result<Self, BackendError> {
        let (users, teams, tags, list_statuses, tasks) = tokio::try_join!(
            backend.fetch_users(),
            backend.fetch_teams(),
            backend.fetch_tags(),
            backend.fetch_list_statuses(),
            backend.fetch_tasks(),
        )?;

        Ok(Self {
            users,
            teams,
            tags,
            list_statuses,
            tasks,
        })
    }

    /// Display name for a user id, "Unassigned" when missing or unknown
    pub fn user_name(&self, user_id: Option<&str>) -> &str {
        user_id
            .and_then(|id| self.users.iter().find(|u| u.id == id))
            .map(|u| u.name.as_str())
            .unwrap_or(UNASSIGNED_USER)
    }

    /// Display name for a team id, "No Team" when missing or unknown
    pub fn team_name(&self, team_id: Option<&str>) -> &str {
        team_id
            .and_then(|id| self.teams.iter().find(|t| t.id == id))
            .map(|t| t.name.as_str())
            .unwrap_or(NO_TEAM)
    }

    pub fn list_status_title(&self, status_id: Option<&str>) -> Option<&str> {
        status_id
            .and_then(|id| self.list_statuses.iter().find(|s| s.id == id))
            .map(|s| s.title.as_str())
    }

    pub fn tag(&self, tag_id: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.id == tag_id)
    }

    /// Tasks without a parent, optionally restricted to one team
    pub fn top_level_tasks(&self, team_id: Option<&str>) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.parent_id.is_none())
            .filter(|t| team_id.is_none() || t.team_id.as_deref() == team_id)
            .collect()
    }

    /// Fold a confirmed edit back into the cached task list.
    pub fn apply_snapshot(&mut self, snapshot: &TaskSnapshot) {
        let parent_id = snapshot.task.id.as_str();
        match self.tasks.iter_mut().find(|t| t.id == parent_id) {
            Some(existing) => *existing = snapshot.task.clone(),
            None => self.tasks.push(snapshot.task.clone()),
        }
        self.tasks.retain(|t| !t.is_subtask_of(parent_id));
        self.tasks.extend(snapshot.subtasks.iter().cloned());
    }
}
