//! Transaction and Line-Item Models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Transaction ID type
pub type TransactionId = RecordId;

/// Sale transaction header
///
/// `total_price` is a snapshot computed at creation time from the line
/// items; later catalog price changes never touch it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TransactionId>,
    /// Owning user (record link)
    pub user: RecordId,
    /// Optional free-text buyer contact
    #[serde(default)]
    pub buyer_contact: String,
    pub total_price: Decimal,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub created_at: i64,
}

/// Priced basket line ready to be persisted, produced by the sales
/// workflow before the owning transaction id exists.
#[derive(Debug, Clone)]
pub struct TransactionItemDraft {
    pub item: RecordId,
    pub quantity: i64,
    pub price: Decimal,
}

/// Line item pivot linking a transaction to a catalog item
///
/// `price` is the unit price observed when the basket was priced - a copy,
/// not a live reference. It is immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Owning transaction (record link)
    pub transaction: RecordId,
    /// Purchased item (record link)
    pub item: RecordId,
    /// Always >= 1
    pub quantity: i64,
    /// Unit price snapshot at purchase time
    pub price: Decimal,
    #[serde(default)]
    pub is_deleted: bool,
}
