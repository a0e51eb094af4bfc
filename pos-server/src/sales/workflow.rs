//! Transaction Workflow
//!
//! Turns a submitted basket into a persisted transaction: resolves every
//! item against the live catalog, snapshots unit prices, computes the total
//! and hands header + lines to the repository as one atomic write.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use crate::db::models::{Transaction, TransactionItemDraft};
use crate::db::repository::{
    make_record_id, item::ITEM_TABLE, user::USER_TABLE, ItemRepository, TransactionRepository,
};
use crate::utils::{time::millis_to_rfc3339, AppError, AppResult};

/// One submitted basket line
#[derive(Debug, Clone, Deserialize)]
pub struct BasketLine {
    pub id_item: String,
    pub quantity: i64,
}

/// Transaction header as rendered to clients
#[derive(Debug, Clone, Serialize)]
pub struct TransactionSummary {
    pub id_transaction: String,
    pub id_user: String,
    pub buyer_contact: String,
    pub total_price: Decimal,
    pub timestamp: String,
}

/// Line item enriched with current catalog data
#[derive(Debug, Clone, Serialize)]
pub struct LineItemDetail {
    pub id_item: String,
    pub item_name: String,
    pub image_url: String,
    pub quantity: i64,
    /// Unit price snapshot at purchase time
    pub price: Decimal,
}

/// Full transaction view: header plus enriched lines
#[derive(Debug, Clone, Serialize)]
pub struct TransactionDetail {
    #[serde(flatten)]
    pub summary: TransactionSummary,
    pub items: Vec<LineItemDetail>,
}

fn summarize(tx: &Transaction) -> TransactionSummary {
    TransactionSummary {
        id_transaction: tx.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
        id_user: tx.user.to_string(),
        buyer_contact: tx.buyer_contact.clone(),
        total_price: tx.total_price,
        timestamp: millis_to_rfc3339(tx.created_at),
    }
}

/// Transaction workflow engine
#[derive(Clone)]
pub struct SalesWorkflow {
    items: ItemRepository,
    transactions: TransactionRepository,
}

impl SalesWorkflow {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            items: ItemRepository::new(db.clone()),
            transactions: TransactionRepository::new(db),
        }
    }

    /// Validate and persist a basket for `user_id`.
    ///
    /// Lines are resolved in submission order; the first unresolvable item
    /// fails the whole basket before anything is written. A quantity of zero
    /// or less is coerced to one.
    pub async fn create(
        &self,
        user_id: &str,
        buyer_contact: String,
        basket: Vec<BasketLine>,
    ) -> AppResult<TransactionSummary> {
        if basket.is_empty() {
            return Err(AppError::validation(
                "transaction must contain at least one item",
            ));
        }

        let mut total = Decimal::ZERO;
        let mut lines = Vec::with_capacity(basket.len());

        for line in basket {
            let item = self
                .items
                .find_by_id(&line.id_item)
                .await?
                .ok_or_else(|| AppError::validation(format!("invalid item: {}", line.id_item)))?;

            let quantity = if line.quantity <= 0 { 1 } else { line.quantity };
            let price = item.price;
            total += price * Decimal::from(quantity);

            lines.push(TransactionItemDraft {
                item: make_record_id(ITEM_TABLE, &line.id_item),
                quantity,
                price,
            });
        }

        let header = Transaction {
            id: None,
            user: make_record_id(USER_TABLE, user_id),
            buyer_contact,
            total_price: total,
            is_deleted: false,
            created_at: crate::utils::time::now_millis(),
        };

        let (created, _) = self.transactions.create_with_items(header, lines).await?;
        tracing::info!(
            transaction = %created.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
            total = %created.total_price,
            "Transaction recorded"
        );
        Ok(summarize(&created))
    }

    /// Fetch a transaction with its lines enriched from the current catalog.
    /// Lines whose item no longer resolves are skipped, not errored.
    pub async fn get(&self, id: &str) -> AppResult<TransactionDetail> {
        let tx = self
            .transactions
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Transaction {id} not found")))?;

        let mut items = Vec::new();
        for line in self.transactions.find_items_by_transaction(id).await? {
            let Some(item) = self.items.find_by_id(&line.item.to_string()).await? else {
                continue;
            };
            items.push(LineItemDetail {
                id_item: line.item.to_string(),
                item_name: item.item_name,
                image_url: item.image_url,
                quantity: line.quantity,
                price: line.price,
            });
        }

        Ok(TransactionDetail {
            summary: summarize(&tx),
            items,
        })
    }

    pub async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<TransactionSummary>> {
        let txs = self.transactions.list_page(limit, offset).await?;
        Ok(txs.iter().map(summarize).collect())
    }

    /// Only the buyer contact is mutable after the sale
    pub async fn update_contact(
        &self,
        id: &str,
        buyer_contact: String,
    ) -> AppResult<TransactionSummary> {
        let updated = self.transactions.update_contact(id, buyer_contact).await?;
        Ok(summarize(&updated))
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.transactions.delete_with_items(id).await?;
        Ok(())
    }
}
