//! Authentication Handlers

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::ServerState;
use crate::db::repository::{SessionRepository, UserRepository};
use crate::utils::{ok_with_message, time::millis_to_rfc3339, AppError, AppResponse, AppResult};

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id_user: String,
    pub email: String,
    pub role: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: UserInfo,
    pub token: String,
}

/// Resolve the rate-limit key: first `x-forwarded-for` hop when present,
/// otherwise the socket peer address
pub fn client_ip(headers: &HeaderMap, addr: &SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| addr.ip().to_string())
}

/// Login: rate-limited credential check, session creation, token issue.
/// Unknown email and wrong password produce the same error.
pub async fn login(
    State(state): State<ServerState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AppResponse<LoginResponse>>> {
    let ip = client_ip(&headers, &addr);
    state.login_limiter.check(&ip)?;

    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let users = UserRepository::new(state.get_db());
    let user = users
        .find_by_email(&req.email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    let password_valid = user
        .verify_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;
    if !password_valid {
        tracing::warn!(email = %req.email, "Login failed");
        return Err(AppError::invalid_credentials());
    }

    let user_id = user.id.clone().ok_or_else(|| {
        AppError::internal("User record has no id".to_string())
    })?;

    let sessions = SessionRepository::new(state.get_db());
    let session = sessions.create(user_id.clone()).await?;
    let session_id = session
        .id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_default();

    let token = state
        .jwt_service
        .generate_token(&user_id.to_string(), &user.email, &user.role, &session_id)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(user = %user_id, "User logged in");

    Ok(ok_with_message(
        LoginResponse {
            user: UserInfo {
                id_user: user_id.to_string(),
                email: user.email,
                role: user.role,
                timestamp: millis_to_rfc3339(user.created_at),
            },
            token,
        },
        "OK",
    ))
}
