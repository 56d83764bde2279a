use serde::{Deserialize, Serialize};

/// A workflow column a task can sit in ("To Do", "In Progress", ...).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListStatus {
    #[serde(deserialize_with = "super::de_id")]
    pub id: String,
    pub title: String,
}

impl ListStatus {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}
