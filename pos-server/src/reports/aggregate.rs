//! Sales Aggregation
//!
//! Pure accumulation over transactions and their line items. No database
//! access here; the engine feeds records in and reads totals out.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

use crate::db::models::{Transaction, TransactionItem};
use crate::utils::time::millis_to_rfc3339;

/// Transaction header as listed in a report
#[derive(Debug, Clone, Serialize)]
pub struct ReportTransaction {
    pub id_transaction: String,
    pub total_price: Decimal,
    pub buyer_contact: String,
    pub timestamp: String,
}

/// Ranked catalog item in a report
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TopItem {
    pub id_item: String,
    pub item_name: String,
    pub image_url: String,
    pub quantity_sold: i64,
    pub revenue: Decimal,
}

/// Aggregate figures shared by full reports and summaries
#[derive(Debug, Clone)]
pub struct ReportTotals {
    pub total_transactions: i64,
    pub sum_total_price: Decimal,
    pub total_products_sold: i64,
    pub average_order_value: Decimal,
    pub min_order_value: Decimal,
    pub max_order_value: Decimal,
    pub average_items_per_transaction: f64,
}

/// Per-item running totals keyed by item id
pub type ItemTotals = HashMap<String, (i64, Decimal)>;

/// Running accumulator over a filtered transaction set
#[derive(Debug, Default)]
pub struct SalesAccumulator {
    count: i64,
    sum: Decimal,
    products_sold: i64,
    /// min/max seed from the first pushed transaction
    min: Option<Decimal>,
    max: Option<Decimal>,
    per_item: ItemTotals,
    listing: Vec<ReportTransaction>,
}

impl SalesAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one transaction and its line items into the running totals.
    /// Records with a zero creation timestamp are skipped.
    pub fn push(&mut self, tx: &Transaction, lines: &[TransactionItem]) {
        if tx.created_at == 0 {
            return;
        }

        self.count += 1;
        self.sum += tx.total_price;
        self.min = Some(match self.min {
            Some(min) => min.min(tx.total_price),
            None => tx.total_price,
        });
        self.max = Some(match self.max {
            Some(max) => max.max(tx.total_price),
            None => tx.total_price,
        });

        for line in lines {
            self.products_sold += line.quantity;
            let entry = self
                .per_item
                .entry(line.item.to_string())
                .or_insert((0, Decimal::ZERO));
            entry.0 += line.quantity;
            entry.1 += line.price * Decimal::from(line.quantity);
        }

        self.listing.push(ReportTransaction {
            id_transaction: tx.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
            total_price: tx.total_price,
            buyer_contact: tx.buyer_contact.clone(),
            timestamp: millis_to_rfc3339(tx.created_at),
        });
    }

    /// Derived figures; averages are zero when nothing matched
    pub fn totals(&self) -> ReportTotals {
        let average_order_value = if self.count > 0 {
            self.sum / Decimal::from(self.count)
        } else {
            Decimal::ZERO
        };
        let average_items_per_transaction = if self.count > 0 {
            self.products_sold as f64 / self.count as f64
        } else {
            0.0
        };

        ReportTotals {
            total_transactions: self.count,
            sum_total_price: self.sum,
            total_products_sold: self.products_sold,
            average_order_value,
            min_order_value: self.min.unwrap_or(Decimal::ZERO),
            max_order_value: self.max.unwrap_or(Decimal::ZERO),
            average_items_per_transaction,
        }
    }

    pub fn item_totals(&self) -> &ItemTotals {
        &self.per_item
    }

    pub fn into_listing(self) -> Vec<ReportTransaction> {
        self.listing
    }
}

/// Sort by quantity sold descending, ties by revenue descending, keep five
pub fn rank_top_items(mut items: Vec<TopItem>) -> Vec<TopItem> {
    items.sort_by(|a, b| {
        b.quantity_sold
            .cmp(&a.quantity_sold)
            .then(b.revenue.cmp(&a.revenue))
    });
    items.truncate(5);
    items
}
