//! Profile API
//!
//! Self-service profile management for the logged-in user.

pub mod handler;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/profile/me", get(handler::me))
        .route("/api/profile", post(handler::create))
        .route("/api/profile/email", put(handler::update_email))
        .route(
            "/api/profile/{id}",
            put(handler::update).delete(handler::delete),
        )
}
