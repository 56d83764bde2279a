use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::{de_id, de_opt_id, Attachment, Comment, Tag};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::Low,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Priority::Low => Priority::High,
            Priority::Medium => Priority::Low,
            Priority::High => Priority::Medium,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task as served by the backend. Subtasks are tasks whose `parent_id` points
/// at another task; they are never embedded.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "de_text")]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub assigned_to: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub assigned_by: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub team_id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de_opt_date")]
    pub due_date: Option<NaiveDate>,
    /// Estimate in minutes.
    #[serde(default, deserialize_with = "de_opt_minutes")]
    pub time_estimation: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub list_status_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_status: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub parent_id: Option<String>,
    #[serde(default, deserialize_with = "de_list")]
    pub tags: Vec<Tag>,
    #[serde(default, deserialize_with = "de_list")]
    pub comments: Vec<Comment>,
    #[serde(default, deserialize_with = "de_list")]
    pub attachments: Vec<Attachment>,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn is_subtask_of(&self, parent_id: &str) -> bool {
        self.parent_id.as_deref() == Some(parent_id)
    }
}

/// Children of `parent_id` in their original order.
pub fn subtasks_of(tasks: &[Task], parent_id: &str) -> Vec<Task> {
    tasks.iter().filter(|t| t.is_subtask_of(parent_id)).cloned().collect()
}

/// What the task editor hands back on confirmation: the edited task together with
/// the edited list of its subtasks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskSnapshot {
    #[serde(flatten)]
    pub task: Task,
    #[serde(default)]
    pub subtasks: Vec<Task>,
}

fn de_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn de_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `null`, `""`, `"2025-03-01"` or a full RFC 3339 timestamp.
fn de_opt_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => {
            let day = value.get(..10).unwrap_or(value);
            NaiveDate::parse_from_str(day, "%Y-%m-%d")
                .map(Some)
                .map_err(serde::de::Error::custom)
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMinutes {
    Number(u32),
    Text(String),
}

fn de_opt_minutes<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawMinutes>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawMinutes::Number(n)) => Ok(Some(n)),
        Some(RawMinutes::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(RawMinutes::Text(s)) => s.trim().parse().map(Some).map_err(serde::de::Error::custom),
    }
}
