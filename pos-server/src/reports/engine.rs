//! Report Engine
//!
//! Fetches the transactions matching a period from storage, folds them
//! through the accumulator and resolves the top-item ranking against the
//! current catalog.

use rust_decimal::Decimal;
use serde::Serialize;
use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use super::aggregate::{rank_top_items, ReportTransaction, SalesAccumulator, TopItem};
use super::period::ReportPeriod;
use crate::db::repository::{ItemRepository, TransactionRepository};
use crate::utils::AppResult;

/// Full report: aggregates plus the matching transaction listing.
/// Day periods carry a `date` label, month periods carry `month`/`year`.
#[derive(Debug, Serialize)]
pub struct SalesReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub total_transactions: i64,
    pub sum_total_price: Decimal,
    pub total_products_sold: i64,
    pub average_order_value: Decimal,
    pub min_order_value: Decimal,
    pub max_order_value: Decimal,
    pub average_items_per_transaction: f64,
    pub top_items: Vec<TopItem>,
    pub transactions: Vec<ReportTransaction>,
}

/// Summary variant: same aggregates, no per-transaction listing
#[derive(Debug, Serialize)]
pub struct TodaySummary {
    pub date: String,
    pub total_transactions: i64,
    pub total_products_sold: i64,
    pub sum_total_price: Decimal,
    pub average_order_value: Decimal,
    pub min_order_value: Decimal,
    pub max_order_value: Decimal,
    pub average_items_per_transaction: f64,
    pub top_items: Vec<TopItem>,
}

#[derive(Clone)]
pub struct ReportEngine {
    transactions: TransactionRepository,
    items: ItemRepository,
}

impl ReportEngine {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            transactions: TransactionRepository::new(db.clone()),
            items: ItemRepository::new(db),
        }
    }

    /// Accumulate everything in the period's range. A period with no
    /// calendar-valid range yields an untouched accumulator.
    async fn accumulate(&self, period: ReportPeriod) -> AppResult<SalesAccumulator> {
        let mut acc = SalesAccumulator::new();

        let Some((start, end)) = period.range() else {
            return Ok(acc);
        };

        for tx in self.transactions.find_in_range(start, end).await? {
            let id = tx.id.as_ref().map(|id| id.to_string()).unwrap_or_default();
            let lines = self.transactions.find_items_by_transaction(&id).await?;
            acc.push(&tx, &lines);
        }
        Ok(acc)
    }

    /// Resolve aggregated item ids against the live catalog and rank them.
    /// Ids that no longer resolve are skipped.
    async fn top_items(&self, acc: &SalesAccumulator) -> AppResult<Vec<TopItem>> {
        let mut entries = Vec::with_capacity(acc.item_totals().len());
        for (id, (quantity_sold, revenue)) in acc.item_totals() {
            let Some(item) = self.items.find_by_id(id).await? else {
                continue;
            };
            entries.push(TopItem {
                id_item: id.clone(),
                item_name: item.item_name,
                image_url: item.image_url,
                quantity_sold: *quantity_sold,
                revenue: *revenue,
            });
        }
        Ok(rank_top_items(entries))
    }

    pub async fn report(&self, period: ReportPeriod) -> AppResult<SalesReport> {
        let acc = self.accumulate(period).await?;
        let totals = acc.totals();
        let top_items = self.top_items(&acc).await?;

        let (month, year) = match period {
            ReportPeriod::Month { month, year } => (Some(month), Some(year)),
            ReportPeriod::Day { .. } => (None, None),
        };

        Ok(SalesReport {
            date: period.date_label(),
            month,
            year,
            total_transactions: totals.total_transactions,
            sum_total_price: totals.sum_total_price,
            total_products_sold: totals.total_products_sold,
            average_order_value: totals.average_order_value,
            min_order_value: totals.min_order_value,
            max_order_value: totals.max_order_value,
            average_items_per_transaction: totals.average_items_per_transaction,
            top_items,
            transactions: acc.into_listing(),
        })
    }

    pub async fn today_summary(&self) -> AppResult<TodaySummary> {
        let period = ReportPeriod::today();
        let acc = self.accumulate(period).await?;
        let totals = acc.totals();
        let top_items = self.top_items(&acc).await?;

        Ok(TodaySummary {
            date: period.date_label().unwrap_or_default(),
            total_transactions: totals.total_transactions,
            total_products_sold: totals.total_products_sold,
            sum_total_price: totals.sum_total_price,
            average_order_value: totals.average_order_value,
            min_order_value: totals.min_order_value,
            max_order_value: totals.max_order_value,
            average_items_per_transaction: totals.average_items_per_transaction,
            top_items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{Item, TransactionItemDraft};
    use crate::db::repository::make_record_id;
    use crate::db::DbService;
    use crate::sales::{BasketLine, SalesWorkflow};
    use chrono::{Datelike, Local};
    use surrealdb::RecordId;

    fn dec(s: &str) -> Decimal {
        s.parse().expect("decimal literal")
    }

    async fn setup() -> (ReportEngine, SalesWorkflow, ItemRepository) {
        let svc = DbService::connect_memory().await.expect("memory db");
        (
            ReportEngine::new(svc.db.clone()),
            SalesWorkflow::new(svc.db.clone()),
            ItemRepository::new(svc.db),
        )
    }

    async fn seed_item(items: &ItemRepository, name: &str, price: &str) -> String {
        let created = items
            .create(Item::new(name.into(), dec(price)))
            .await
            .expect("seed item");
        created.id.as_ref().expect("id").to_string()
    }

    #[tokio::test]
    async fn today_report_covers_fresh_sales() {
        let (engine, workflow, items) = setup().await;
        let coffee = seed_item(&items, "Coffee", "10.00").await;
        let cake = seed_item(&items, "Cake", "5.50").await;

        workflow
            .create(
                "users:u1",
                String::new(),
                vec![
                    BasketLine {
                        id_item: coffee,
                        quantity: 2,
                    },
                    BasketLine {
                        id_item: cake,
                        quantity: 1,
                    },
                ],
            )
            .await
            .expect("create");

        let report = engine.report(ReportPeriod::today()).await.expect("report");
        assert_eq!(report.total_transactions, 1);
        assert_eq!(report.sum_total_price, dec("25.50"));
        assert_eq!(report.total_products_sold, 3);
        assert_eq!(report.min_order_value, dec("25.50"));
        assert_eq!(report.max_order_value, dec("25.50"));
        assert_eq!(report.transactions.len(), 1);
        assert_eq!(report.top_items.len(), 2);
        assert_eq!(report.top_items[0].item_name, "Coffee");
        assert_eq!(report.top_items[0].quantity_sold, 2);
        assert_eq!(report.top_items[0].revenue, dec("20.00"));
    }

    #[tokio::test]
    async fn day_report_counts_only_that_day() {
        let svc = DbService::connect_memory().await.expect("memory db");
        let engine = ReportEngine::new(svc.db.clone());
        let items = ItemRepository::new(svc.db.clone());
        let transactions = TransactionRepository::new(svc.db);

        let item = seed_item(&items, "Thing", "1.00").await;
        let period = ReportPeriod::day(1, 5, 2024).expect("valid");
        let (day_start, day_end) = period.range().expect("range");

        // Three sales on the report day, one the morning after
        for (total, offset_ms) in [("10.00", 0), ("20.00", 3_600_000), ("30.00", 7_200_000)] {
            let header = crate::db::models::Transaction {
                id: None,
                user: RecordId::from_table_key("users", "u1"),
                buyer_contact: String::new(),
                total_price: dec(total),
                is_deleted: false,
                created_at: day_start + offset_ms,
            };
            transactions
                .create_with_items(
                    header,
                    vec![TransactionItemDraft {
                        item: make_record_id("items", &item),
                        quantity: 1,
                        price: dec(total),
                    }],
                )
                .await
                .expect("create");
        }
        let next_day = crate::db::models::Transaction {
            id: None,
            user: RecordId::from_table_key("users", "u1"),
            buyer_contact: String::new(),
            total_price: dec("99.00"),
            is_deleted: false,
            created_at: day_end + 3_600_000,
        };
        transactions
            .create_with_items(
                next_day,
                vec![TransactionItemDraft {
                    item: make_record_id("items", &item),
                    quantity: 1,
                    price: dec("99.00"),
                }],
            )
            .await
            .expect("create");

        let report = engine.report(period).await.expect("report");
        assert_eq!(report.date.as_deref(), Some("2024-05-01"));
        assert_eq!(report.total_transactions, 3);
        assert_eq!(report.sum_total_price, dec("60.00"));
        assert_eq!(report.min_order_value, dec("10.00"));
        assert_eq!(report.max_order_value, dec("30.00"));
        assert_eq!(report.average_order_value, dec("20.00"));
        assert_eq!(report.transactions.len(), 3);

        let next = engine
            .report(ReportPeriod::day(2, 5, 2024).expect("valid"))
            .await
            .expect("report");
        assert_eq!(next.total_transactions, 1);
        assert_eq!(next.sum_total_price, dec("99.00"));
    }

    #[tokio::test]
    async fn non_calendar_date_yields_empty_report() {
        let (engine, workflow, items) = setup().await;
        let item = seed_item(&items, "Thing", "1.00").await;
        workflow
            .create(
                "users:u1",
                String::new(),
                vec![BasketLine {
                    id_item: item,
                    quantity: 1,
                }],
            )
            .await
            .expect("create");

        let period = ReportPeriod::day(30, 2, 2024).expect("range check passes");
        let report = engine.report(period).await.expect("report");
        assert_eq!(report.total_transactions, 0);
        assert!(report.transactions.is_empty());
        assert!(report.top_items.is_empty());
    }

    #[tokio::test]
    async fn month_report_carries_month_year_labels() {
        let (engine, _, _) = setup().await;
        let now = Local::now();
        let report = engine
            .report(ReportPeriod::month(now.month(), now.year()).expect("valid"))
            .await
            .expect("report");
        assert_eq!(report.month, Some(now.month()));
        assert_eq!(report.year, Some(now.year()));
        assert!(report.date.is_none());
    }

    #[tokio::test]
    async fn summary_repeats_report_aggregates_without_listing() {
        let (engine, workflow, items) = setup().await;
        let item = seed_item(&items, "Snack", "4.00").await;
        workflow
            .create(
                "users:u1",
                String::new(),
                vec![BasketLine {
                    id_item: item,
                    quantity: 3,
                }],
            )
            .await
            .expect("create");

        let first = engine.today_summary().await.expect("summary");
        let second = engine.today_summary().await.expect("summary");

        assert_eq!(first.total_transactions, 1);
        assert_eq!(first.sum_total_price, dec("12.00"));
        assert_eq!(first.total_products_sold, 3);
        // No intervening writes, identical output
        assert_eq!(first.total_transactions, second.total_transactions);
        assert_eq!(first.sum_total_price, second.sum_total_price);
        assert_eq!(first.top_items, second.top_items);
    }
}
