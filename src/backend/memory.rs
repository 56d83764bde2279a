//! In-process backend over a JSON dataset.
//!
//! Useful offline and in tests. Edits live for the lifetime of the process.

use async_trait::async_trait;
use chrono::{Duration, Local};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::sync::RwLock;

use super::{Backend, BackendError};
use crate::entities::{subtasks_of, ListStatus, Priority, Tag, Task, TaskSnapshot, Team, User};

/// The collections a memory backend serves.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    pub users: Vec<User>,
    pub teams: Vec<Team>,
    pub tags: Vec<Tag>,
    #[serde(alias = "list_status")]
    pub list_statuses: Vec<ListStatus>,
    pub tasks: Vec<Task>,
}

impl Dataset {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        use anyhow::Context;

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read dataset: {}", path.as_ref().display()))?;
        serde_json::from_str(&content).with_context(|| format!("Failed to parse dataset: {}", path.as_ref().display()))
    }

    /// Small built-in dataset so the app is usable without a server.
    pub fn sample() -> Self {
        let today = Local::now().date_naive();

        let users = vec![
            User::new("1", "Alex Morgan"),
            User::new("2", "Sam Lee"),
            User::new("3", "Priya Shah"),
        ];
        let teams = vec![Team::new("1", "Platform"), Team::new("2", "Mobile")];
        let tags = vec![
            Tag::new("1", "bug"),
            Tag::new("2", "feature"),
            Tag::new("3", "urgent"),
            Tag::new("4", "design"),
        ];
        let list_statuses = vec![
            ListStatus::new("1", "To Do"),
            ListStatus::new("2", "In Progress"),
            ListStatus::new("3", "Review"),
            ListStatus::new("4", "Done"),
        ];

        let mut login = Task::new("1", "Fix login redirect loop");
        login.description = "Users bounce between /login and /home after the session expires.".to_string();
        login.priority = Priority::High;
        login.assigned_to = Some("2".to_string());
        login.assigned_by = Some("1".to_string());
        login.team_id = Some("1".to_string());
        login.list_status_id = Some("2".to_string());
        login.start_date = Some(today - Duration::days(2));
        login.due_date = Some(today + Duration::days(1));
        login.time_estimation = Some(90);
        login.tags = vec![tags[0].clone(), tags[2].clone()];

        let mut session = Task::new("2", "Reproduce with expired cookie");
        session.parent_id = Some("1".to_string());
        session.assigned_to = Some("2".to_string());
        session.team_id = Some("1".to_string());
        session.list_status_id = Some("4".to_string());

        let mut regression = Task::new("3", "Add regression test");
        regression.parent_id = Some("1".to_string());
        regression.assigned_to = Some("3".to_string());
        regression.team_id = Some("1".to_string());
        regression.list_status_id = Some("1".to_string());

        let mut onboarding = Task::new("4", "Redesign onboarding screens");
        onboarding.description = "New illustrations and a shorter flow.".to_string();
        onboarding.priority = Priority::Medium;
        onboarding.assigned_to = Some("3".to_string());
        onboarding.assigned_by = Some("1".to_string());
        onboarding.team_id = Some("2".to_string());
        onboarding.list_status_id = Some("1".to_string());
        onboarding.due_date = Some(today + Duration::days(10));
        onboarding.time_estimation = Some(480);
        onboarding.tags = vec![tags[1].clone(), tags[3].clone()];

        let mut docs = Task::new("5", "Write release notes");
        docs.priority = Priority::Low;
        docs.list_status_id = Some("1".to_string());

        Self {
            users,
            teams,
            tags,
            list_statuses,
            tasks: vec![login, session, regression, onboarding, docs],
        }
    }
}

/// Backend answering from a [`Dataset`] held in memory.
pub struct MemoryBackend {
    data: RwLock<Dataset>,
}

impl MemoryBackend {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            data: RwLock::new(dataset),
        }
    }

    /// Copy of the current dataset, edits included.
    pub async fn dataset(&self) -> Dataset {
        self.data.read().await.clone()
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new(Dataset::sample())
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    fn backend_type(&self) -> &str {
        "memory"
    }

    async fn fetch_teams(&self) -> Result<Vec<Team>, BackendError> {
        Ok(self.data.read().await.teams.clone())
    }

    async fn fetch_users(&self) -> Result<Vec<User>, BackendError> {
        Ok(self.data.read().await.users.clone())
    }

    async fn fetch_tags(&self) -> Result<Vec<Tag>, BackendError> {
        Ok(self.data.read().await.tags.clone())
    }

    async fn fetch_list_statuses(&self) -> Result<Vec<ListStatus>, BackendError> {
        Ok(self.data.read().await.list_statuses.clone())
    }

    async fn fetch_tasks(&self) -> Result<Vec<Task>, BackendError> {
        Ok(self.data.read().await.tasks.clone())
    }

    async fn list_subtasks(&self, parent_id: &str) -> Result<Vec<Task>, BackendError> {
        Ok(subtasks_of(&self.data.read().await.tasks, parent_id))
    }

    async fn update_task(&self, snapshot: &TaskSnapshot) -> Result<(), BackendError> {
        let mut data = self.data.write().await;
        let parent_id = snapshot.task.id.clone();

        let existing = data
            .tasks
            .iter_mut()
            .find(|t| t.id == parent_id)
            .ok_or_else(|| BackendError::NotFound(format!("task {}", parent_id)))?;

        // Preview files belong to the edit session that staged them.
        let mut task = snapshot.task.clone();
        for attachment in &mut task.attachments {
            attachment.url = None;
        }
        *existing = task;

        data.tasks.retain(|t| !t.is_subtask_of(&parent_id));
        data.tasks.extend(snapshot.subtasks.iter().cloned().map(|mut subtask| {
            subtask.parent_id = Some(parent_id.clone());
            subtask
        }));

        Ok(())
    }
}
