//! Plain data records exchanged with the backend and edited by the UI.
//!
//! Identifiers are carried as strings. Task servers frequently hand out numeric
//! ids, so the deserializers below accept either a JSON string or a JSON number.

pub mod attachment;
pub mod comment;
pub mod list_status;
pub mod tag;
pub mod task;
pub mod team;
pub mod user;

pub use attachment::Attachment;
pub use comment::Comment;
pub use list_status::ListStatus;
pub use tag::Tag;
pub use task::{subtasks_of, Priority, Task, TaskSnapshot};
pub use team::Team;
pub use user::User;

use serde::{Deserialize, Deserializer};
use uuid::Uuid;

/// Generate an identifier for a record created locally during an edit session.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
    Float(f64),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Text(s) => s,
            RawId::Int(n) => n.to_string(),
            RawId::Float(f) => f.to_string(),
        }
    }
}

pub(crate) fn de_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(RawId::into_string)
}

/// Optional id; an empty string is treated the same as a missing value.
pub(crate) fn de_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawId>::deserialize(deserializer)?;
    Ok(raw.map(RawId::into_string).filter(|id| !id.is_empty()))
}
