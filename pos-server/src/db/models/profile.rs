//! User Profile Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Profile ID type
pub type ProfileId = RecordId;

/// Personal-info record attached to a user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProfileId>,
    /// Owning user (record link)
    pub user: RecordId,
    pub name: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub created_at: i64,
}

impl Profile {
    pub fn new(user: RecordId, name: String) -> Self {
        Self {
            id: None,
            user,
            name,
            contact: String::new(),
            address: String::new(),
            image_url: String::new(),
            is_deleted: false,
            created_at: crate::utils::time::now_millis(),
        }
    }
}

/// Partial update payload, merged into the stored record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}
