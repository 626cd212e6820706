//! Handlers for the `/category` resource.
//!
//! Every backend failure is returned as a 500 carrying a fresh error id;
//! a fetch by id that matches nothing is an empty list, not a 404.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;

use micropos_core::error::CoreError;
use micropos_core::types::RecordId;
use micropos_db::models::category::{CreateCategory, UpdateCategory};
use micropos_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::query::AvailabilityParams;
use crate::response::ResourceList;
use crate::state::AppState;

const ENTITY: &str = "Category";

// ---------------------------------------------------------------------------
// GET /category/
// ---------------------------------------------------------------------------

/// List categories, optionally only those with a matching `is_available`.
pub async fn list_categories(
    State(state): State<AppState>,
    Query(params): Query<AvailabilityParams>,
) -> AppResult<impl IntoResponse> {
    let page = CategoryRepo::list(state.db(), params.available)
        .await
        .map_err(|e| AppError::backend("Failed to retrieve categories", e))?;
    tracing::debug!(count = page.rows.len(), available = ?params.available, "Listed categories");
    Ok(Json(ResourceList::from_page(page)))
}

// ---------------------------------------------------------------------------
// GET /category/{id}
// ---------------------------------------------------------------------------

pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<impl IntoResponse> {
    let page = CategoryRepo::find_by_id(state.db(), id)
        .await
        .map_err(|e| AppError::backend("Failed to retrieve category", e))?;
    Ok(Json(ResourceList::from_page(page)))
}

// ---------------------------------------------------------------------------
// POST /category/create
// ---------------------------------------------------------------------------

/// Create a category. `created_at` is always stamped by the server.
pub async fn create_category(
    State(state): State<AppState>,
    ValidJson(mut input): ValidJson<CreateCategory>,
) -> AppResult<impl IntoResponse> {
    input.created_at = Some(Utc::now());

    let created = CategoryRepo::create(state.db(), &input)
        .await
        .map_err(|e| AppError::backend(format!("Failed to create category: {}", input.title), e))?;
    tracing::info!(id = ?created.id, title = %input.title, "Category created");
    Ok((StatusCode::CREATED, Json(ResourceList::single(created))))
}

// ---------------------------------------------------------------------------
// PATCH /category/{id}
// ---------------------------------------------------------------------------

/// Apply a partial update. `updated_at` is always stamped by the server.
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    ValidJson(mut input): ValidJson<UpdateCategory>,
) -> AppResult<impl IntoResponse> {
    input.updated_at = Some(Utc::now());

    let updated = CategoryRepo::update(state.db(), id, &input)
        .await
        .map_err(|e| AppError::backend("Failed to update category", e))?
        .ok_or(CoreError::NotFound { entity: ENTITY, id })?;
    tracing::info!(%id, "Category updated");
    Ok(Json(ResourceList::single(updated)))
}

// ---------------------------------------------------------------------------
// DELETE /category/{id}
// ---------------------------------------------------------------------------

pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<impl IntoResponse> {
    let deleted = CategoryRepo::delete(state.db(), id)
        .await
        .map_err(|e| AppError::backend("Failed to delete category", e))?
        .ok_or(CoreError::NotFound { entity: ENTITY, id })?;
    tracing::info!(%id, "Category deleted");
    Ok(Json(ResourceList::single(deleted)))
}
