//! Transaction Repository
//!
//! Owns both the transaction header table and the line-item pivot table.
//! Header and lines are written (and soft-deleted) inside a single database
//! transaction so a failure never leaves orphaned lines.

use super::{make_record_id, BaseRepository, RepoError, RepoResult};
use crate::db::models::{Transaction, TransactionItem, TransactionItemDraft};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use uuid::Uuid;

pub const TRANSACTION_TABLE: &str = "transactions";
pub const TRANSACTION_ITEM_TABLE: &str = "transaction_items";

#[derive(Clone)]
pub struct TransactionRepository {
    base: BaseRepository,
}

impl TransactionRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Transaction>> {
        let txs: Vec<Transaction> = self
            .base
            .db()
            .query("SELECT * FROM transactions WHERE id = $id AND is_deleted = false")
            .bind(("id", make_record_id(TRANSACTION_TABLE, id)))
            .await?
            .take(0)?;
        Ok(txs.into_iter().next())
    }

    pub async fn list_page(&self, limit: i64, offset: i64) -> RepoResult<Vec<Transaction>> {
        let txs: Vec<Transaction> = self
            .base
            .db()
            .query(
                "SELECT * FROM transactions WHERE is_deleted = false \
                 ORDER BY created_at DESC LIMIT $limit START $offset",
            )
            .bind(("limit", limit))
            .bind(("offset", offset))
            .await?
            .take(0)?;
        Ok(txs)
    }

    /// Transactions whose `created_at` falls in `[start, end)` milliseconds.
    /// The date filter runs at the storage layer, not over a full table scan
    /// in the caller.
    pub async fn find_in_range(&self, start: i64, end: i64) -> RepoResult<Vec<Transaction>> {
        let txs: Vec<Transaction> = self
            .base
            .db()
            .query(
                "SELECT * FROM transactions WHERE is_deleted = false \
                 AND created_at >= $start AND created_at < $end \
                 ORDER BY created_at ASC",
            )
            .bind(("start", start))
            .bind(("end", end))
            .await?
            .take(0)?;
        Ok(txs)
    }

    /// Persist a priced basket: header plus all line items, atomically.
    ///
    /// The header key is generated here so the lines can reference it inside
    /// the same transaction block.
    pub async fn create_with_items(
        &self,
        mut header: Transaction,
        lines: Vec<TransactionItemDraft>,
    ) -> RepoResult<(Transaction, Vec<TransactionItem>)> {
        if lines.is_empty() {
            return Err(RepoError::Validation("transaction has no items".into()));
        }

        let tx_id = RecordId::from_table_key(
            TRANSACTION_TABLE,
            Uuid::new_v4().simple().to_string(),
        );
        header.id = None;

        let items: Vec<TransactionItem> = lines
            .into_iter()
            .map(|line| TransactionItem {
                id: None,
                transaction: tx_id.clone(),
                item: line.item,
                quantity: line.quantity,
                price: line.price,
                is_deleted: false,
            })
            .collect();

        let mut response = self
            .base
            .db()
            .query(
                "BEGIN TRANSACTION; \
                 CREATE $tx CONTENT $header; \
                 INSERT INTO transaction_items $lines; \
                 COMMIT TRANSACTION;",
            )
            .bind(("tx", tx_id))
            .bind(("header", header))
            .bind(("lines", items))
            .await?;

        let created: Vec<Transaction> = response.take(0)?;
        let created_items: Vec<TransactionItem> = response.take(1)?;

        let header = created
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create transaction".to_string()))?;
        Ok((header, created_items))
    }

    pub async fn find_items_by_transaction(
        &self,
        id: &str,
    ) -> RepoResult<Vec<TransactionItem>> {
        let items: Vec<TransactionItem> = self
            .base
            .db()
            .query(
                "SELECT * FROM transaction_items \
                 WHERE transaction = $tx AND is_deleted = false",
            )
            .bind(("tx", make_record_id(TRANSACTION_TABLE, id)))
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Only the buyer contact is mutable after creation
    pub async fn update_contact(&self, id: &str, buyer_contact: String) -> RepoResult<Transaction> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Transaction {id} not found")))?;

        let updated: Vec<Transaction> = self
            .base
            .db()
            .query("UPDATE $id SET buyer_contact = $buyer_contact RETURN AFTER")
            .bind(("id", make_record_id(TRANSACTION_TABLE, id)))
            .bind(("buyer_contact", buyer_contact))
            .await?
            .take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to update transaction".to_string()))
    }

    /// Soft-delete the header and its lines together
    pub async fn delete_with_items(&self, id: &str) -> RepoResult<bool> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Transaction {id} not found")))?;

        self.base
            .db()
            .query(
                "BEGIN TRANSACTION; \
                 UPDATE $tx SET is_deleted = true; \
                 UPDATE transaction_items SET is_deleted = true WHERE transaction = $tx; \
                 COMMIT TRANSACTION;",
            )
            .bind(("tx", make_record_id(TRANSACTION_TABLE, id)))
            .await?
            .check()?;
        Ok(true)
    }
}
