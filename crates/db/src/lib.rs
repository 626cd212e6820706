//! Client layer for the managed backend.
//!
//! The backend exposes every table through a PostgREST-style REST
//! interface. [`Query`] describes one request, [`TableClient`] executes it,
//! and the repositories translate between typed models and raw rows.

pub mod client;
pub mod error;
pub mod models;
pub mod postgrest;
pub mod query;
pub mod repositories;

pub use client::{Page, QueryResponse, TableClient};
pub use error::DbError;
pub use postgrest::PostgrestClient;
pub use query::Query;

/// Table probed by [`health_check`].
const HEALTH_CHECK_TABLE: &str = "category";

/// Verify the backend answers a trivial read.
pub async fn health_check(client: &dyn TableClient) -> Result<(), DbError> {
    client
        .execute(Query::select(HEALTH_CHECK_TABLE, "id").limit(1))
        .await?;
    Ok(())
}
