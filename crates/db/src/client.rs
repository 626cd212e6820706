use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::DbError;
use crate::query::Query;

/// Executes [`Query`] values against a backend.
///
/// The production implementation is [`crate::PostgrestClient`]; handlers
/// and the seeder only depend on this trait so tests can swap in fakes.
#[async_trait]
pub trait TableClient: Send + Sync {
    async fn execute(&self, query: Query) -> Result<QueryResponse, DbError>;
}

/// Raw rows plus the optional exact count reported by the backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResponse {
    pub data: Vec<Value>,
    pub count: Option<i64>,
}

impl QueryResponse {
    /// Decode every row into `T`.
    pub fn decode<T: DeserializeOwned>(self, table: &str) -> Result<Page<T>, DbError> {
        let rows = self
            .data
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<T>, _>>()
            .map_err(|source| DbError::Decode {
                table: table.to_string(),
                source,
            })?;

        Ok(Page {
            rows,
            count: self.count,
        })
    }
}

/// Typed rows returned by a repository call.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub rows: Vec<T>,
    pub count: Option<i64>,
}

impl<T> Page<T> {
    /// The first row, if any.
    pub fn into_first(self) -> Option<T> {
        self.rows.into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: i64,
    }

    #[test]
    fn decode_keeps_order_and_count() {
        let response = QueryResponse {
            data: vec![json!({ "id": 2 }), json!({ "id": 1 })],
            count: Some(2),
        };
        let page: Page<Row> = response.decode("t").unwrap();
        assert_eq!(page.rows, vec![Row { id: 2 }, Row { id: 1 }]);
        assert_eq!(page.count, Some(2));
        assert_eq!(page.into_first(), Some(Row { id: 2 }));
    }

    #[test]
    fn decode_reports_table_on_shape_mismatch() {
        let response = QueryResponse {
            data: vec![json!({ "id": "not a number" })],
            count: None,
        };
        let err = response.decode::<Row>("item").unwrap_err();
        assert_matches!(err, DbError::Decode { ref table, .. } if table == "item");
        assert_eq!(err.kind(), "decode");
    }
}
