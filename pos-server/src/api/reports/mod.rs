//! Sales Report API

mod handler;

use axum::{routing::get, Router};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/report/date/{dd}/{mm}/{yyyy}",
            get(handler::daily_report),
        )
        .route("/api/report/today", get(handler::today_report))
        .route("/api/report/today/summary", get(handler::today_summary))
        .route("/api/report/{month}/{year}", get(handler::monthly_report))
}
