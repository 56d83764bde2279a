use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// File attached to a task.
///
/// `file_size` is the human readable size (see [`crate::utils::format::format_file_size`]).
/// `url` points at the staged local preview for attachments added in the current
/// session and is only valid while that session is open.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(deserialize_with = "super::de_id")]
    pub id: String,
    #[serde(deserialize_with = "super::de_id")]
    pub task_id: String,
    pub file_name: String,
    pub file_size: String,
    #[serde(default)]
    pub file_type: String,
    #[serde(default, deserialize_with = "super::de_opt_id")]
    pub uploaded_by: Option<String>,
    pub uploaded_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}
