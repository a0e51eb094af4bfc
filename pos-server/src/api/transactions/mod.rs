//! Transaction API

mod handler;

use axum::{
    routing::get,
    Router,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/transactions",
            get(handler::list).post(handler::create),
        )
        .route(
            "/api/transactions/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
