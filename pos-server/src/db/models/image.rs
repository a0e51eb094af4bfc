//! Stored Image Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Image ID type
pub type ImageId = RecordId;

/// Binary blob with metadata, stored base64-encoded.
///
/// `data` is only shipped to clients through the download endpoints;
/// listings and references use the record id / file name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ImageId>,
    pub file_name: String,
    pub content_type: String,
    /// Decoded payload size in bytes
    pub size: i64,
    /// Base64-encoded payload
    pub data: String,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub created_at: i64,
}

impl Image {
    pub fn new(file_name: String, content_type: String, size: i64, data: String) -> Self {
        Self {
            id: None,
            file_name,
            content_type,
            size,
            data,
            is_deleted: false,
            created_at: crate::utils::time::now_millis(),
        }
    }
}
