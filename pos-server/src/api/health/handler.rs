//! Health Handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::core::ServerState;
use crate::utils::{ok, AppError, AppResponse, AppResult};

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub database: &'static str,
}

/// Liveness plus a database round-trip
pub async fn health(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<HealthStatus>>> {
    state
        .db
        .query("RETURN 1")
        .await
        .map_err(|e| AppError::database(format!("Health check query failed: {e}")))?;

    Ok(ok(HealthStatus {
        status: "ok",
        database: "ok",
    }))
}
