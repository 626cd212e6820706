//! Repository for the `category` table.

use micropos_core::types::RecordId;

use crate::client::{Page, TableClient};
use crate::error::DbError;
use crate::models::category::{Category, CreateCategory, UpdateCategory};
use crate::query::Query;
use crate::repositories::to_payload;

const TABLE: &str = "category";

/// Provides CRUD operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category, returning the stored row.
    pub async fn create(
        client: &dyn TableClient,
        input: &CreateCategory,
    ) -> Result<Category, DbError> {
        let payload = to_payload(TABLE, input)?;
        client
            .execute(Query::insert(TABLE, payload))
            .await?
            .decode::<Category>(TABLE)?
            .into_first()
            .ok_or(DbError::EmptyResponse {
                table: TABLE.to_string(),
                operation: "insert",
            })
    }

    /// Fetch a category by id. A missing row yields an empty page.
    pub async fn find_by_id(
        client: &dyn TableClient,
        id: RecordId,
    ) -> Result<Page<Category>, DbError> {
        client
            .execute(Query::select(TABLE, "*").count_exact().eq("id", id))
            .await?
            .decode(TABLE)
    }

    /// List categories, optionally filtered by availability.
    pub async fn list(
        client: &dyn TableClient,
        available: Option<bool>,
    ) -> Result<Page<Category>, DbError> {
        let mut query = Query::select(TABLE, "*").count_exact();
        if let Some(available) = available {
            query = query.eq("is_available", available);
        }
        client.execute(query).await?.decode(TABLE)
    }

    /// Apply the set fields of `input`. Returns `None` if no row matched.
    pub async fn update(
        client: &dyn TableClient,
        id: RecordId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, DbError> {
        let payload = to_payload(TABLE, input)?;
        Ok(client
            .execute(Query::update(TABLE, payload).eq("id", id))
            .await?
            .decode::<Category>(TABLE)?
            .into_first())
    }

    /// Delete a category, returning the removed row if one existed.
    pub async fn delete(
        client: &dyn TableClient,
        id: RecordId,
    ) -> Result<Option<Category>, DbError> {
        Ok(client
            .execute(Query::delete(TABLE).eq("id", id))
            .await?
            .decode::<Category>(TABLE)?
            .into_first())
    }
}
