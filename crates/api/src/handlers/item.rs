//! Handlers for the `/item` resource.
//!
//! Prices are quantized to two fractional digits before they are sent to
//! the backend.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;

use micropos_core::error::CoreError;
use micropos_core::types::RecordId;
use micropos_db::models::item::{CreateItem, UpdateItem};
use micropos_db::repositories::ItemRepo;

use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::query::AvailabilityParams;
use crate::response::ResourceList;
use crate::state::AppState;

const ENTITY: &str = "Item";

// ---------------------------------------------------------------------------
// GET /item/
// ---------------------------------------------------------------------------

/// List items, optionally only those with a matching `is_available`.
pub async fn list_items(
    State(state): State<AppState>,
    Query(params): Query<AvailabilityParams>,
) -> AppResult<impl IntoResponse> {
    let page = ItemRepo::list(state.db(), params.available)
        .await
        .map_err(|e| AppError::backend("Failed to retrieve items", e))?;
    tracing::debug!(count = page.rows.len(), available = ?params.available, "Listed items");
    Ok(Json(ResourceList::from_page(page)))
}

// ---------------------------------------------------------------------------
// GET /item/{id}
// ---------------------------------------------------------------------------

pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<impl IntoResponse> {
    let page = ItemRepo::find_by_id(state.db(), id)
        .await
        .map_err(|e| AppError::backend("Failed to retrieve item", e))?;
    Ok(Json(ResourceList::from_page(page)))
}

// ---------------------------------------------------------------------------
// POST /item/create
// ---------------------------------------------------------------------------

/// Create a menu item. `created_at` is always stamped by the server.
pub async fn create_item(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateItem>,
) -> AppResult<impl IntoResponse> {
    let mut input = input.normalized();
    input.created_at = Some(Utc::now());

    let created = ItemRepo::create(state.db(), &input)
        .await
        .map_err(|e| AppError::backend(format!("Failed to create item: {}", input.title), e))?;
    tracing::info!(id = ?created.id, title = %input.title, price = %input.price, "Item created");
    Ok((StatusCode::CREATED, Json(ResourceList::single(created))))
}

// ---------------------------------------------------------------------------
// PATCH /item/{id}
// ---------------------------------------------------------------------------

/// Apply a partial update. `updated_at` is always stamped by the server.
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    ValidJson(input): ValidJson<UpdateItem>,
) -> AppResult<impl IntoResponse> {
    let mut input = input.normalized();
    input.updated_at = Some(Utc::now());

    let updated = ItemRepo::update(state.db(), id, &input)
        .await
        .map_err(|e| AppError::backend("Failed to update item", e))?
        .ok_or(CoreError::NotFound { entity: ENTITY, id })?;
    tracing::info!(%id, "Item updated");
    Ok(Json(ResourceList::single(updated)))
}

// ---------------------------------------------------------------------------
// DELETE /item/{id}
// ---------------------------------------------------------------------------

pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<impl IntoResponse> {
    let deleted = ItemRepo::delete(state.db(), id)
        .await
        .map_err(|e| AppError::backend("Failed to delete item", e))?
        .ok_or(CoreError::NotFound { entity: ENTITY, id })?;
    tracing::info!(%id, "Item deleted");
    Ok(Json(ResourceList::single(deleted)))
}
