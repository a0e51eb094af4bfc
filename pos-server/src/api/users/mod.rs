//! User Administration API

mod handler;

use axum::{routing::post, Router};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/users", post(handler::create).get(handler::list))
}
