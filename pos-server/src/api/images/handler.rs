//! Image Handlers

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::IntoResponse;
use axum::Json;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::models::Image;
use crate::db::repository::ImageRepository;
use crate::utils::{millis_to_rfc3339, ok, ok_with_message, AppError, AppResponse, AppResult};

use super::super::PageQuery;

#[derive(Debug, Serialize)]
pub struct ImageInfo {
    pub id_image: String,
    pub file_name: String,
    pub content_type: String,
    pub size: i64,
    pub timestamp: String,
}

impl From<&Image> for ImageInfo {
    fn from(image: &Image) -> Self {
        Self {
            id_image: image.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
            file_name: image.file_name.clone(),
            content_type: image.content_type.clone(),
            size: image.size,
            timestamp: millis_to_rfc3339(image.created_at),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UploadBase64Request {
    pub file_name: String,
    #[serde(default)]
    pub content_type: String,
    pub data_base64: String,
}

#[derive(Debug, Serialize)]
pub struct Base64Download {
    pub content_type: String,
    pub data_base64: String,
}

fn guess_content_type(file_name: &str, declared: Option<&str>) -> String {
    match declared.filter(|c| !c.is_empty()) {
        Some(c) => c.to_string(),
        None => mime_guess::from_path(file_name)
            .first_or_octet_stream()
            .to_string(),
    }
}

/// Metadata listing, payloads excluded
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<AppResponse<Vec<ImageInfo>>>> {
    let images = ImageRepository::new(state.get_db());
    let found = images.list_page(query.limit(), query.offset()).await?;
    Ok(ok(found.iter().map(ImageInfo::from).collect()))
}

/// Multipart upload; the payload travels in the `file` field
pub async fn upload(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> AppResult<Json<AppResponse<ImageInfo>>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .filter(|n| !n.is_empty())
            .unwrap_or("upload")
            .to_string();
        let declared = field.content_type().map(|c| c.to_string());
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::validation(format!("failed to read upload: {e}")))?;
        if bytes.is_empty() {
            return Err(AppError::validation("uploaded file is empty"));
        }

        let content_type = guess_content_type(&file_name, declared.as_deref());
        let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
        let image = Image::new(file_name, content_type, bytes.len() as i64, encoded);

        let images = ImageRepository::new(state.get_db());
        let stored = images.create(image).await?;
        return Ok(ok_with_message(ImageInfo::from(&stored), "uploaded"));
    }

    Err(AppError::validation("missing file field"))
}

/// JSON upload with a base64 payload
pub async fn upload_base64(
    State(state): State<ServerState>,
    Json(req): Json<UploadBase64Request>,
) -> AppResult<Json<AppResponse<ImageInfo>>> {
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(&req.data_base64)
        .map_err(|e| AppError::validation(format!("invalid base64 payload: {e}")))?;
    if decoded.is_empty() {
        return Err(AppError::validation("image payload is empty"));
    }

    let content_type = guess_content_type(
        &req.file_name,
        Some(req.content_type.as_str()).filter(|c| !c.is_empty()),
    );
    let image = Image::new(
        req.file_name,
        content_type,
        decoded.len() as i64,
        req.data_base64,
    );

    let images = ImageRepository::new(state.get_db());
    let stored = images.create(image).await?;
    Ok(ok_with_message(ImageInfo::from(&stored), "uploaded"))
}

/// Raw bytes with the stored content type
pub async fn download(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let images = ImageRepository::new(state.get_db());
    let image = images
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("image not found"))?;

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(&image.data)
        .map_err(|_| AppError::internal("stored image payload is corrupt"))?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(&image.content_type)
            .unwrap_or(HeaderValue::from_static("application/octet-stream")),
    );
    Ok((headers, bytes))
}

/// Base64 payload for clients that cannot take raw bytes
pub async fn download_base64(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Base64Download>>> {
    let images = ImageRepository::new(state.get_db());
    let image = images
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("image not found"))?;

    Ok(ok(Base64Download {
        content_type: image.content_type,
        data_base64: image.data,
    }))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<serde_json::Value>>> {
    let images = ImageRepository::new(state.get_db());
    images
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("image not found"))?;
    images.delete(&id).await?;
    Ok(ok_with_message(serde_json::json!({ "id": id }), "deleted"))
}
