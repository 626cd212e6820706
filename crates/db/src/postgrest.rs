//! REST client for the backend's PostgREST endpoint.
//!
//! Translates a [`Query`] into `{api_url}/rest/v1/{table}` requests using
//! [`reqwest`]. Every request carries the project API key in both the
//! `apikey` and `Authorization` headers.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_RANGE};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use crate::client::{QueryResponse, TableClient};
use crate::error::DbError;
use crate::query::{Operation, Query};

/// HTTP request timeout for a single backend call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Path prefix of the REST interface.
const REST_PREFIX: &str = "rest/v1";

/// HTTP client for one backend project.
#[derive(Clone)]
pub struct PostgrestClient {
    http: reqwest::Client,
    rest_url: String,
    api_key: String,
}

impl std::fmt::Debug for PostgrestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgrestClient")
            .field("rest_url", &self.rest_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Error body returned by PostgREST on failure.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: Option<String>,
    message: Option<String>,
    details: Option<String>,
}

impl PostgrestClient {
    /// Create a client for the project at `api_url`.
    pub fn new(api_url: &str, api_key: &str) -> Result<Self, DbError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Self::with_client(http, api_url, api_key)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        http: reqwest::Client,
        api_url: &str,
        api_key: &str,
    ) -> Result<Self, DbError> {
        let base = api_url.trim().trim_end_matches('/');
        if base.is_empty() {
            return Err(DbError::Config("API URL is empty".into()));
        }
        if api_key.trim().is_empty() {
            return Err(DbError::Config("API key is empty".into()));
        }
        HeaderValue::from_str(api_key)
            .map_err(|_| DbError::Config("API key contains invalid header characters".into()))?;

        Ok(Self {
            http,
            rest_url: format!("{base}/{REST_PREFIX}"),
            api_key: api_key.to_string(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.rest_url, table)
    }

    /// Build the HTTP request for `query` without sending it.
    fn build_request(&self, query: &Query) -> RequestBuilder {
        let operation = query.operation();
        let method = match operation {
            Operation::Select { .. } => Method::GET,
            Operation::Insert { .. } => Method::POST,
            Operation::Update { .. } => Method::PATCH,
            Operation::Delete => Method::DELETE,
        };

        let mut params: Vec<(String, String)> = Vec::new();
        if let Operation::Select { columns } = operation {
            params.push(("select".into(), columns.clone()));
        }
        for filter in query.filters() {
            params.push((filter.column.clone(), format!("eq.{}", filter.value)));
        }
        if let Some(limit) = query.row_limit() {
            params.push(("limit".into(), limit.to_string()));
        }

        let mut prefer = Vec::new();
        if query.wants_count() {
            prefer.push("count=exact");
        }
        if operation.returns_representation() {
            prefer.push("return=representation");
        }

        let mut request = self
            .http
            .request(method, self.table_url(query.table()))
            .query(&params)
            .header("apikey", &self.api_key)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key));

        if !prefer.is_empty() {
            request = request.header("Prefer", prefer.join(","));
        }

        match operation {
            Operation::Insert { payload } | Operation::Update { payload } => request.json(payload),
            _ => request,
        }
    }
}

#[async_trait]
impl TableClient for PostgrestClient {
    async fn execute(&self, query: Query) -> Result<QueryResponse, DbError> {
        tracing::debug!(
            table = query.table(),
            operation = query.operation().name(),
            filters = query.filters().len(),
            "Executing backend query"
        );

        let response = self.build_request(&query).send().await?;
        let status = response.status();
        let count = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range_total);

        let body = response.text().await?;

        if !status.is_success() {
            return Err(api_error(status, &body));
        }

        let data = parse_rows(query.table(), &body)?;
        Ok(QueryResponse { data, count })
    }
}

/// Extract the total from a `Content-Range` value such as `0-24/573`.
///
/// Returns `None` when the total is unknown (`*`).
fn parse_content_range_total(value: &str) -> Option<i64> {
    value.rsplit_once('/')?.1.trim().parse().ok()
}

fn parse_rows(table: &str, body: &str) -> Result<Vec<Value>, DbError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    let value: Value = serde_json::from_str(body).map_err(|source| DbError::Decode {
        table: table.to_string(),
        source,
    })?;
    Ok(match value {
        Value::Array(rows) => rows,
        Value::Null => Vec::new(),
        single => vec![single],
    })
}

fn api_error(status: StatusCode, body: &str) -> DbError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => {
            let mut message = parsed
                .message
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string());
            if let Some(details) = parsed.details {
                message = format!("{message} ({details})");
            }
            DbError::Api {
                status: status.as_u16(),
                code: parsed.code,
                message,
            }
        }
        Err(_) => DbError::Api {
            status: status.as_u16(),
            code: None,
            message: if body.is_empty() {
                "<empty body>".to_string()
            } else {
                body.to_string()
            },
        },
    }
}
