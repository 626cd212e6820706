//! Shared response envelope for API handlers.
//!
//! Every resource endpoint answers `{ "data": [...], "count": n }`, even
//! single-row fetches and writes, so clients handle one shape.

use serde::Serialize;

/// Standard `{ "data": [T], "count": n }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(ResourceList::from_page(page)))
/// ```
#[derive(Debug, Serialize)]
pub struct ResourceList<T: Serialize> {
    pub data: Vec<T>,
    pub count: i64,
}

impl<T: Serialize> ResourceList<T> {
    /// Wrap rows, using the backend's exact count when it reported one.
    pub fn from_page(page: micropos_db::Page<T>) -> Self {
        let count = page.count.unwrap_or(page.rows.len() as i64);
        Self {
            data: page.rows,
            count,
        }
    }

    pub fn single(row: T) -> Self {
        Self {
            data: vec![row],
            count: 1,
        }
    }
}
