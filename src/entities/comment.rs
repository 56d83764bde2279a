use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(deserialize_with = "super::de_id")]
    pub id: String,
    pub comment: String,
    pub comment_by: String,
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "super::de_id")]
    pub task_id: String,
}

impl Comment {
    /// Build a comment authored now with a freshly generated id.
    pub fn new(task_id: &str, text: &str, author: &str) -> Self {
        Self {
            id: super::generate_id(),
            comment: text.to_string(),
            comment_by: author.to_string(),
            created_at: Utc::now(),
            task_id: task_id.to_string(),
        }
    }
}
