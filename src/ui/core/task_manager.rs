use super::actions::Action;
use crate::backend::{Backend, ReferenceData};
use crate::entities::TaskSnapshot;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub type TaskId = u64;

#[derive(Debug)]
pub struct BackgroundTask {
    pub id: TaskId,
    pub handle: JoinHandle<()>,
    pub description: String,
    pub started_at: std::time::Instant,
}

/// Runs backend calls off the UI loop and reports their outcome as actions.
pub struct TaskManager {
    tasks: HashMap<TaskId, BackgroundTask>,
    next_task_id: TaskId,
    action_sender: mpsc::UnboundedSender<Action>,
}

impl TaskManager {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();

        (
            Self {
                tasks: HashMap::new(),
                next_task_id: 1,
                action_sender: tx,
            },
            rx,
        )
    }

    /// Spawn `operation` and forward the action it resolves to.
    pub fn spawn<Fut>(&mut self, description: impl Into<String>, operation: Fut) -> TaskId
    where
        Fut: Future<Output = Action> + Send + 'static,
    {
        let task_id = self.next_task_id;
        self.next_task_id += 1;

        let description = description.into();
        log::debug!("Task manager: starting #{} {}", task_id, description);

        let action_sender = self.action_sender.clone();
        let handle = tokio::spawn(async move {
            let action = operation.await;
            // The receiver is gone once the app shuts down
            let _ = action_sender.send(action);
        });

        self.tasks.insert(
            task_id,
            BackgroundTask {
                id: task_id,
                handle,
                description,
                started_at: std::time::Instant::now(),
            },
        );
        task_id
    }

    /// Load users, teams, tags, list statuses and tasks
    pub fn spawn_reference_load(&mut self, backend: Arc<dyn Backend>) -> TaskId {
        self.spawn("Load reference data", async move {
            match ReferenceData::load(backend.as_ref()).await {
                Ok(data) => Action::ReferenceDataLoaded(Box::new(data)),
                Err(e) => Action::ReferenceDataFailed(e.to_string()),
            }
        })
    }

    pub fn spawn_team_fetch(&mut self, backend: Arc<dyn Backend>) -> TaskId {
        self.spawn("Fetch teams", async move {
            match backend.fetch_teams().await {
                Ok(teams) => Action::TeamsLoaded(teams),
                Err(e) => Action::TeamsFailed(e.to_string()),
            }
        })
    }

    pub fn spawn_subtask_load(&mut self, backend: Arc<dyn Backend>, parent_id: String) -> TaskId {
        let description = format!("Load subtasks of {}", parent_id);
        self.spawn(description, async move {
            match backend.list_subtasks(&parent_id).await {
                Ok(subtasks) => Action::SubtasksLoaded { parent_id, subtasks },
                Err(e) => Action::SubtasksFailed {
                    parent_id,
                    error: e.to_string(),
                },
            }
        })
    }

    pub fn spawn_task_update(&mut self, backend: Arc<dyn Backend>, snapshot: TaskSnapshot) -> TaskId {
        let description = format!("Update task {}", snapshot.task.id);
        self.spawn(description, async move {
            match backend.update_task(&snapshot).await {
                Ok(()) => Action::TaskUpdated(Box::new(snapshot)),
                Err(e) => Action::TaskUpdateFailed {
                    task_id: snapshot.task.id.clone(),
                    error: e.to_string(),
                },
            }
        })
    }

    /// Forget tasks whose handle has finished. Returns how many were removed.
    pub fn cleanup_finished_tasks(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|_, task| {
            let done = task.handle.is_finished();
            if done {
                log::debug!(
                    "Task manager: #{} {} finished after {:?}",
                    task.id,
                    task.description,
                    task.started_at.elapsed()
                );
            }
            !done
        });
        before - self.tasks.len()
    }

    /// Whether a task with this description prefix is still running
    pub fn is_running(&self, description_prefix: &str) -> bool {
        self.tasks
            .values()
            .any(|task| task.description.starts_with(description_prefix))
    }

    /// Cancel all running tasks
    pub fn cancel_all_tasks(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.handle.abort();
        }
    }

    /// Get the number of active tasks
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        // Cancel all tasks when the manager is dropped
        self.cancel_all_tasks();
    }
}
