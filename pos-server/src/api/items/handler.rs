//! Item Catalog Handlers

use axum::extract::{Path, Query, State};
use axum::Json;
use base64::Engine;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{Image, Item, ItemUpdate};
use crate::db::repository::{ImageRepository, ItemRepository};
use crate::utils::{millis_to_rfc3339, ok, ok_with_message, AppError, AppResponse, AppResult};

#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub id_item: String,
    pub item_name: String,
    pub item_type: String,
    pub is_available: bool,
    pub price: Decimal,
    pub description: String,
    pub image_url: String,
    pub timestamp: String,
}

impl From<&Item> for ItemResponse {
    fn from(item: &Item) -> Self {
        Self {
            id_item: item.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
            item_name: item.item_name.clone(),
            item_type: item.item_type.clone(),
            is_available: item.is_available,
            price: item.price,
            description: item.description.clone(),
            image_url: item.image_url.clone(),
            timestamp: millis_to_rfc3339(item.created_at),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateItemRequest {
    #[validate(length(min = 1))]
    pub item_name: String,
    #[serde(default)]
    pub item_type: String,
    pub is_available: Option<bool>,
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    /// Optional inline image payload stored alongside the item
    pub image_base64: Option<String>,
    pub image_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub item_name: Option<String>,
    pub item_type: Option<String>,
    pub is_available: Option<bool>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub image_base64: Option<String>,
    pub image_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListItemsQuery {
    pub count: Option<i64>,
    pub page: Option<i64>,
    /// Optional category filter
    #[serde(rename = "type")]
    pub item_type: Option<String>,
}

impl ListItemsQuery {
    fn page(&self) -> super::super::PageQuery {
        super::super::PageQuery {
            count: self.count,
            page: self.page,
        }
    }
}

/// Store an inline base64 payload as an image record. Failures are logged
/// and ignored so a bad payload never blocks the item write.
async fn store_inline_image(
    state: &ServerState,
    name: &str,
    data_base64: &str,
    content_type: Option<&str>,
) -> Option<String> {
    let decoded = match base64::engine::general_purpose::STANDARD.decode(data_base64) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("inline image for {name} is not valid base64: {e}");
            return None;
        }
    };

    let content_type = content_type
        .filter(|c| !c.is_empty())
        .unwrap_or("image/png")
        .to_string();
    let image = Image::new(
        format!("{name}.img"),
        content_type,
        decoded.len() as i64,
        data_base64.to_string(),
    );

    let images = ImageRepository::new(state.get_db());
    match images.create(image).await {
        Ok(stored) => stored.id.as_ref().map(|id| id.to_string()),
        Err(e) => {
            warn!("failed to store inline image for {name}: {e}");
            None
        }
    }
}

/// Paginated catalog listing, optionally filtered by type
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListItemsQuery>,
) -> AppResult<Json<AppResponse<Vec<ItemResponse>>>> {
    let items = ItemRepository::new(state.get_db());
    let page = query.page();
    let found = match query.item_type.as_deref().filter(|t| !t.is_empty()) {
        Some(item_type) => {
            items
                .list_page_by_type(page.limit(), page.offset(), item_type)
                .await?
        }
        None => items.list_page(page.limit(), page.offset()).await?,
    };
    Ok(ok(found.iter().map(ItemResponse::from).collect()))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<ItemResponse>>> {
    let items = ItemRepository::new(state.get_db());
    let item = items
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("item not found"))?;
    Ok(ok(ItemResponse::from(&item)))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(req): Json<CreateItemRequest>,
) -> AppResult<Json<AppResponse<ItemResponse>>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let mut item = Item::new(req.item_name, req.price);
    item.item_type = req.item_type;
    item.description = req.description;
    item.image_url = req.image_url;
    if let Some(available) = req.is_available {
        item.is_available = available;
    }

    if let Some(data) = req.image_base64.as_deref().filter(|d| !d.is_empty()) {
        if let Some(image_id) =
            store_inline_image(&state, &item.item_name, data, req.image_type.as_deref()).await
        {
            item.image_url = image_id;
        }
    }

    let items = ItemRepository::new(state.get_db());
    let created = items.create(item).await?;
    Ok(ok_with_message(ItemResponse::from(&created), "created"))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateItemRequest>,
) -> AppResult<Json<AppResponse<ItemResponse>>> {
    let mut data = ItemUpdate {
        item_name: req.item_name,
        item_type: req.item_type,
        is_available: req.is_available,
        price: req.price,
        description: req.description,
        image_url: req.image_url,
    };

    if let Some(payload) = req.image_base64.as_deref().filter(|d| !d.is_empty()) {
        let name = data.item_name.clone().unwrap_or_else(|| id.clone());
        if let Some(image_id) =
            store_inline_image(&state, &name, payload, req.image_type.as_deref()).await
        {
            data.image_url = Some(image_id);
        }
    }

    let items = ItemRepository::new(state.get_db());
    let updated = items.update(&id, data).await?;
    Ok(ok_with_message(ItemResponse::from(&updated), "updated"))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<serde_json::Value>>> {
    let items = ItemRepository::new(state.get_db());
    items
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("item not found"))?;
    items.delete(&id).await?;
    Ok(ok_with_message(serde_json::json!({ "id": id }), "deleted"))
}
