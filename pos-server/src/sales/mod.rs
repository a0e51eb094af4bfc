//! Sales Engine
//!
//! Basket validation, pricing and transaction lifecycle.

pub mod workflow;

pub use workflow::{
    BasketLine, LineItemDetail, SalesWorkflow, TransactionDetail, TransactionSummary,
};
