//! Profile Handlers

use axum::{extract::Path, extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Profile, ProfileUpdate, UserUpdate};
use crate::db::repository::{make_record_id, user::USER_TABLE, ProfileRepository, UserRepository};
use crate::utils::{ok, ok_with_message, AppError, AppResponse, AppResult};

#[derive(Debug, Serialize)]
pub struct ProfileSummary {
    pub id_profile: String,
    pub name: String,
    pub contact: String,
    pub address: String,
    pub image_url: String,
}

impl From<&Profile> for ProfileSummary {
    fn from(p: &Profile) -> Self {
        Self {
            id_profile: p.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
            name: p.name.clone(),
            contact: p.contact.clone(),
            address: p.address.clone(),
            image_url: p.image_url.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user_id: String,
    pub email: String,
    pub role: String,
    pub profiles: Vec<ProfileSummary>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProfileRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub image_url: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub contact: Option<String>,
    pub address: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateEmailRequest {
    #[validate(email)]
    pub email: String,
}

/// Resolve a profile and check it belongs to the caller. Foreign profiles
/// read as not-found, not forbidden.
async fn owned_profile(
    profiles: &ProfileRepository,
    id: &str,
    current: &CurrentUser,
) -> AppResult<Profile> {
    let profile = profiles
        .find_by_id(id)
        .await?
        .filter(|p| p.user == make_record_id(USER_TABLE, &current.id))
        .ok_or_else(|| AppError::not_found("profile not found"))?;
    Ok(profile)
}

/// Current account with its profiles
pub async fn me(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Json<AppResponse<MeResponse>>> {
    let users = UserRepository::new(state.get_db());
    let user = users
        .find_by_id(&current.id)
        .await?
        .ok_or_else(|| AppError::not_found("user not found"))?;

    let profiles = ProfileRepository::new(state.get_db());
    let owned = profiles
        .list_by_user(make_record_id(USER_TABLE, &current.id))
        .await?;

    Ok(ok(MeResponse {
        user_id: user.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
        email: user.email,
        role: user.role,
        profiles: owned.iter().map(ProfileSummary::from).collect(),
    }))
}

pub async fn create(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<CreateProfileRequest>,
) -> AppResult<Json<AppResponse<ProfileSummary>>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let profiles = ProfileRepository::new(state.get_db());
    let mut profile = Profile::new(make_record_id(USER_TABLE, &current.id), req.name);
    profile.contact = req.contact;
    profile.address = req.address;
    profile.image_url = req.image_url;

    let created = profiles.create(profile).await?;
    Ok(ok_with_message(ProfileSummary::from(&created), "created"))
}

pub async fn update(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(req): Json<UpdateProfileRequest>,
) -> AppResult<Json<AppResponse<ProfileSummary>>> {
    let profiles = ProfileRepository::new(state.get_db());
    owned_profile(&profiles, &id, &current).await?;

    let updated = profiles
        .update(
            &id,
            ProfileUpdate {
                name: req.name,
                contact: req.contact,
                address: req.address,
                image_url: req.image_url,
            },
        )
        .await?;
    Ok(ok_with_message(ProfileSummary::from(&updated), "updated"))
}

pub async fn delete(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<serde_json::Value>>> {
    let profiles = ProfileRepository::new(state.get_db());
    owned_profile(&profiles, &id, &current).await?;

    profiles.delete(&id).await?;
    Ok(ok_with_message(serde_json::json!({ "id": id }), "deleted"))
}

/// Change the account email
pub async fn update_email(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<UpdateEmailRequest>,
) -> AppResult<Json<AppResponse<serde_json::Value>>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let users = UserRepository::new(state.get_db());
    let updated = users
        .update(
            &current.id,
            UserUpdate {
                email: Some(req.email),
                ..Default::default()
            },
        )
        .await?;

    Ok(ok_with_message(
        serde_json::json!({ "email": updated.email }),
        "email updated",
    ))
}
