//! User Administration Handlers
//!
//! Admin-only account management: create a user with a primary profile,
//! list accounts. Non-admin callers are rejected.

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::PageQuery;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Profile, User};
use crate::db::repository::{ProfileRepository, UserRepository};
use crate::utils::{ok, ok_with_message, time::millis_to_rfc3339, AppError, AppResponse, AppResult};

use super::super::auth::handler::UserInfo;
use super::super::profile::handler::ProfileSummary;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
    #[serde(default)]
    pub role: String,
    pub profile: NewProfile,
}

#[derive(Debug, Deserialize)]
pub struct NewProfile {
    pub name: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub image_url: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedUser {
    pub user: UserInfo,
    pub profile: ProfileSummary,
}

fn require_admin(user: &CurrentUser) -> AppResult<()> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(AppError::Unauthorized)
    }
}

/// Create a user account together with its primary profile.
/// Role defaults to `cashier` when omitted.
pub async fn create(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<CreateUserRequest>,
) -> AppResult<Json<AppResponse<CreatedUser>>> {
    require_admin(&current)?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let role = if req.role.trim().is_empty() {
        "cashier".to_string()
    } else {
        req.role.clone()
    };

    let hash = User::hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;

    let users = UserRepository::new(state.get_db());
    let user = users.create(User::new(req.email, hash, role)).await?;
    let user_id = user
        .id
        .clone()
        .ok_or_else(|| AppError::internal("User record has no id".to_string()))?;

    let profiles = ProfileRepository::new(state.get_db());
    let mut profile = Profile::new(user_id.clone(), req.profile.name);
    profile.contact = req.profile.contact;
    profile.address = req.profile.address;
    profile.image_url = req.profile.image_url;

    let profile = match profiles.create(profile).await {
        Ok(p) => p,
        Err(e) => {
            // Best-effort rollback so a half-created account does not linger
            let _ = users.delete(&user_id.to_string()).await;
            return Err(e.into());
        }
    };

    tracing::info!(user = %user_id, "User account created");

    Ok(ok_with_message(
        CreatedUser {
            user: UserInfo {
                id_user: user_id.to_string(),
                email: user.email,
                role: user.role,
                timestamp: millis_to_rfc3339(user.created_at),
            },
            profile: ProfileSummary::from(&profile),
        },
        "created",
    ))
}

/// Paginated account listing, passwords omitted
pub async fn list(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<AppResponse<Vec<UserInfo>>>> {
    require_admin(&current)?;

    let users = UserRepository::new(state.get_db());
    let records = users.list_page(page.limit(), page.offset()).await?;

    let out = records
        .into_iter()
        .map(|u| UserInfo {
            id_user: u.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
            email: u.email,
            role: u.role,
            timestamp: millis_to_rfc3339(u.created_at),
        })
        .collect();

    Ok(ok(out))
}
