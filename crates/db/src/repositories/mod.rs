//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&dyn TableClient` as the first argument.

pub mod category_repo;
pub mod item_repo;

pub use category_repo::CategoryRepo;
pub use item_repo::ItemRepo;

use serde::Serialize;

use crate::error::DbError;

/// Encode a DTO into the JSON payload sent to the backend.
pub(crate) fn to_payload<T: Serialize>(table: &str, input: &T) -> Result<serde_json::Value, DbError> {
    serde_json::to_value(input).map_err(|source| DbError::Encode {
        table: table.to_string(),
        source,
    })
}
