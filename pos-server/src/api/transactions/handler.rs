//! Transaction Handlers

use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::sales::{BasketLine, SalesWorkflow, TransactionDetail, TransactionSummary};
use crate::utils::{ok, ok_with_message, AppResponse, AppResult};

use super::super::PageQuery;

#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    #[serde(default)]
    pub buyer_contact: String,
    pub items: Vec<BasketLine>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTransactionRequest {
    pub buyer_contact: Option<String>,
}

/// Record a sale for the authenticated cashier
pub async fn create(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<CreateTransactionRequest>,
) -> AppResult<Json<AppResponse<TransactionDetail>>> {
    let workflow = SalesWorkflow::new(state.get_db());
    let summary = workflow
        .create(&current.id, req.buyer_contact, req.items)
        .await?;
    let detail = workflow.get(&summary.id_transaction).await?;
    Ok(ok_with_message(detail, "created"))
}

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<AppResponse<Vec<TransactionSummary>>>> {
    let workflow = SalesWorkflow::new(state.get_db());
    let found = workflow.list(query.limit(), query.offset()).await?;
    Ok(ok(found))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<TransactionDetail>>> {
    let workflow = SalesWorkflow::new(state.get_db());
    Ok(ok(workflow.get(&id).await?))
}

/// Only the buyer contact is mutable after the sale; a request without one
/// returns the current record unchanged.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateTransactionRequest>,
) -> AppResult<Json<AppResponse<TransactionSummary>>> {
    let workflow = SalesWorkflow::new(state.get_db());
    let summary = match req.buyer_contact {
        Some(contact) => workflow.update_contact(&id, contact).await?,
        None => workflow.get(&id).await?.summary,
    };
    Ok(ok_with_message(summary, "updated"))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<serde_json::Value>>> {
    let workflow = SalesWorkflow::new(state.get_db());
    workflow.delete(&id).await?;
    Ok(ok_with_message(serde_json::json!({ "id": id }), "deleted"))
}
