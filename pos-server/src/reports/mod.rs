//! Reporting Engine
//!
//! Date-filtered sales reports: totals, order-value extremes, averages and
//! the top-5 item ranking.

pub mod aggregate;
pub mod engine;
pub mod period;

pub use aggregate::{rank_top_items, ReportTransaction, SalesAccumulator, TopItem};
pub use engine::{ReportEngine, SalesReport, TodaySummary};
pub use period::ReportPeriod;
