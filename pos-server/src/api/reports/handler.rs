//! Sales Report Handlers

use axum::extract::{Path, State};
use axum::Json;

use crate::core::ServerState;
use crate::reports::{ReportEngine, ReportPeriod, SalesReport, TodaySummary};
use crate::utils::{ok, AppResponse, AppResult};

/// Full report for one calendar day
pub async fn daily_report(
    State(state): State<ServerState>,
    Path((dd, mm, yyyy)): Path<(u32, u32, i32)>,
) -> AppResult<Json<AppResponse<SalesReport>>> {
    let period = ReportPeriod::day(dd, mm, yyyy)?;
    let engine = ReportEngine::new(state.get_db());
    Ok(ok(engine.report(period).await?))
}

/// Full report for one calendar month
pub async fn monthly_report(
    State(state): State<ServerState>,
    Path((month, year)): Path<(u32, i32)>,
) -> AppResult<Json<AppResponse<SalesReport>>> {
    let period = ReportPeriod::month(month, year)?;
    let engine = ReportEngine::new(state.get_db());
    Ok(ok(engine.report(period).await?))
}

/// Full report for the current local day
pub async fn today_report(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<SalesReport>>> {
    let engine = ReportEngine::new(state.get_db());
    Ok(ok(engine.report(ReportPeriod::today()).await?))
}

/// Aggregates only, no per-transaction listing
pub async fn today_summary(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<TodaySummary>>> {
    let engine = ReportEngine::new(state.get_db());
    Ok(ok(engine.today_summary().await?))
}
