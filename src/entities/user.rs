use serde::{Deserialize, Serialize};

/// Reference user. Some servers label the key `user_id`, so that alias is accepted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "user_id", deserialize_with = "super::de_id")]
    pub id: String,
    pub name: String,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
