//! Login Session Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Session ID type
pub type SessionId = RecordId;

/// Login session record, created on every successful login.
/// The session id is embedded in the issued JWT.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SessionId>,
    /// Owning user (record link)
    pub user: RecordId,
    #[serde(default = "default_true")]
    pub is_logged_in: bool,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub created_at: i64,
}

fn default_true() -> bool {
    true
}

impl Session {
    pub fn new(user: RecordId) -> Self {
        Self {
            id: None,
            user,
            is_logged_in: true,
            is_deleted: false,
            created_at: crate::utils::time::now_millis(),
        }
    }
}
