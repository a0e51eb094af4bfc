//! HTTP API
//!
//! Per-resource route modules, merged into one router. Every module exposes
//! a `router()` returning `Router<ServerState>`; handlers live in the
//! module's `handler.rs`.

pub mod auth;
pub mod health;
pub mod images;
pub mod items;
pub mod profile;
pub mod reports;
pub mod transactions;
pub mod users;

use axum::{middleware, Router};
use serde::Deserialize;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

use crate::auth::require_auth;
use crate::core::ServerState;

/// Request log middleware
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    tracing::info!(target: "http_access", "{} {} {}", method, uri, response.status());

    response
}

/// Build the router without state
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(auth::router())
        .merge(health::router())
        .merge(users::router())
        .merge(profile::router())
        .merge(items::router())
        .merge(transactions::router())
        .merge(reports::router())
        .merge(images::router())
}

/// Build the final service: state, auth middleware and the tower-http stack
pub fn build_router(state: ServerState) -> Router {
    build_app()
        // Applied at router level; require_auth skips public routes itself
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(log_request))
}

/// Pagination query parameters shared by the listing endpoints
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub count: Option<i64>,
    pub page: Option<i64>,
}

impl PageQuery {
    /// Page size: default 10, capped at 100
    pub fn limit(&self) -> i64 {
        match self.count {
            Some(n) if n > 100 => 100,
            Some(n) if n > 0 => n,
            _ => 10,
        }
    }

    /// Offset derived from the 1-based page number
    pub fn offset(&self) -> i64 {
        let page = match self.page {
            Some(p) if p > 0 => p,
            _ => 1,
        };
        (page - 1) * self.limit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(count: Option<i64>, page: Option<i64>) -> PageQuery {
        PageQuery { count, page }
    }

    #[test]
    fn pagination_defaults_and_clamps() {
        assert_eq!(q(None, None).limit(), 10);
        assert_eq!(q(Some(0), None).limit(), 10);
        assert_eq!(q(Some(-5), None).limit(), 10);
        assert_eq!(q(Some(25), None).limit(), 25);
        assert_eq!(q(Some(500), None).limit(), 100);

        assert_eq!(q(None, None).offset(), 0);
        assert_eq!(q(None, Some(0)).offset(), 0);
        assert_eq!(q(None, Some(-2)).offset(), 0);
        assert_eq!(q(Some(20), Some(3)).offset(), 40);
    }
}
