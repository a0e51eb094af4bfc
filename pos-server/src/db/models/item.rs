//! Catalog Item Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Item ID type
pub type ItemId = RecordId;

/// Catalog item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    pub item_name: String,
    /// Free-form category/type tag used by the catalog listing filter
    #[serde(default)]
    pub item_type: String,
    #[serde(default = "default_true")]
    pub is_available: bool,
    /// Unit price, two fractional digits
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub created_at: i64,
}

fn default_true() -> bool {
    true
}

impl Item {
    pub fn new(item_name: String, price: Decimal) -> Self {
        Self {
            id: None,
            item_name,
            item_type: String::new(),
            is_available: true,
            price,
            description: String::new(),
            image_url: String::new(),
            is_deleted: false,
            created_at: crate::utils::time::now_millis(),
        }
    }
}

/// Partial update payload, merged into the stored record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}
