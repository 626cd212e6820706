//! Request description for the remote query builder.
//!
//! A [`Query`] targets one table with one operation plus optional equality
//! filters, mirroring the subset of the PostgREST grammar the service uses:
//!
//! ```ignore
//! Query::select("item", "*").count_exact().eq("is_available", true)
//! Query::insert("item", json!({ "title": "Soup", "price": "4.50" }))
//! Query::update("item", payload).eq("id", id)
//! Query::delete("item").eq("id", id)
//! ```

use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Select { columns: String },
    Insert { payload: Value },
    Update { payload: Value },
    Delete,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Select { .. } => "select",
            Operation::Insert { .. } => "insert",
            Operation::Update { .. } => "update",
            Operation::Delete => "delete",
        }
    }

    /// Writes ask the backend to echo the affected rows.
    pub fn returns_representation(&self) -> bool {
        !matches!(self, Operation::Select { .. })
    }
}

/// `column = value` filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub column: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    table: String,
    operation: Operation,
    filters: Vec<Filter>,
    count_exact: bool,
    limit: Option<usize>,
}

impl Query {
    fn new(table: impl Into<String>, operation: Operation) -> Self {
        Self {
            table: table.into(),
            operation,
            filters: Vec::new(),
            count_exact: false,
            limit: None,
        }
    }

    pub fn select(table: impl Into<String>, columns: impl Into<String>) -> Self {
        Self::new(
            table,
            Operation::Select {
                columns: columns.into(),
            },
        )
    }

    pub fn insert(table: impl Into<String>, payload: Value) -> Self {
        Self::new(table, Operation::Insert { payload })
    }

    pub fn update(table: impl Into<String>, payload: Value) -> Self {
        Self::new(table, Operation::Update { payload })
    }

    pub fn delete(table: impl Into<String>) -> Self {
        Self::new(table, Operation::Delete)
    }

    /// Restrict the query to rows where `column` equals `value`.
    pub fn eq(mut self, column: impl Into<String>, value: impl ToString) -> Self {
        self.filters.push(Filter {
            column: column.into(),
            value: value.to_string(),
        });
        self
    }

    /// Ask the backend for the exact number of matching rows.
    pub fn count_exact(mut self) -> Self {
        self.count_exact = true;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn wants_count(&self) -> bool {
        self.count_exact
    }

    pub fn row_limit(&self) -> Option<usize> {
        self.limit
    }
}
