//! Repository for the `item` table.

use micropos_core::types::RecordId;
use serde::de::DeserializeOwned;

use crate::client::{Page, TableClient};
use crate::error::DbError;
use crate::models::item::{CreateItem, Item, StoredItem, UpdateItem};
use crate::query::Query;
use crate::repositories::to_payload;

const TABLE: &str = "item";

/// Provides CRUD operations for menu items.
pub struct ItemRepo;

impl ItemRepo {
    /// Insert a new menu item, returning the stored row.
    pub async fn create(
        client: &dyn TableClient,
        input: &CreateItem,
    ) -> Result<Item, DbError> {
        Self::insert_as(client, input).await
    }

    /// Insert a new menu item, decoding only its `id` and `title`.
    pub async fn create_stored(
        client: &dyn TableClient,
        input: &CreateItem,
    ) -> Result<StoredItem, DbError> {
        Self::insert_as(client, input).await
    }

    async fn insert_as<T: DeserializeOwned>(
        client: &dyn TableClient,
        input: &CreateItem,
    ) -> Result<T, DbError> {
        let payload = to_payload(TABLE, input)?;
        client
            .execute(Query::insert(TABLE, payload))
            .await?
            .decode::<T>(TABLE)?
            .into_first()
            .ok_or(DbError::EmptyResponse {
                table: TABLE.to_string(),
                operation: "insert",
            })
    }

    /// Fetch a menu item by id. A missing row yields an empty page.
    pub async fn find_by_id(
        client: &dyn TableClient,
        id: RecordId,
    ) -> Result<Page<Item>, DbError> {
        client
            .execute(Query::select(TABLE, "*").count_exact().eq("id", id))
            .await?
            .decode(TABLE)
    }

    /// List menu items, optionally filtered by availability.
    pub async fn list(
        client: &dyn TableClient,
        available: Option<bool>,
    ) -> Result<Page<Item>, DbError> {
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
        input: &UpdateItem,
    ) -> Result<Option<Item>, DbError> {
        let payload = to_payload(TABLE, input)?;
        Ok(client
            .execute(Query::update(TABLE, payload).eq("id", id))
            .await?
            .decode::<Item>(TABLE)?
            .into_first())
    }

    /// Delete a menu item, returning the removed row if one existed.
    pub async fn delete(
        client: &dyn TableClient,
        id: RecordId,
    ) -> Result<Option<Item>, DbError> {
        Ok(client
            .execute(Query::delete(TABLE).eq("id", id))
            .await?
            .decode::<Item>(TABLE)?
            .into_first())
    }
}
