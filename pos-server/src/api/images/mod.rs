//! Image API

mod handler;

use axum::{
    routing::{get, post},
    Router,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/images", get(handler::list))
        .route("/api/images/upload", post(handler::upload))
        .route("/api/images/upload/base64", post(handler::upload_base64))
        .route(
            "/api/images/{id}",
            get(handler::download).delete(handler::delete),
        )
        .route("/api/images/{id}/base64", get(handler::download_base64))
}
