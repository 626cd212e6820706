#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use micropos_api::config::ServerConfig;
use micropos_api::router::build_app_router;
use micropos_api::state::AppState;
use micropos_core::environment::Environment;
use micropos_core::settings::Settings;
use micropos_db::query::Operation;
use micropos_db::{DbError, Query, QueryResponse, TableClient};

/// In-memory stand-in for the backend, keyed by table name.
#[derive(Default)]
pub struct MemoryClient {
    tables: Mutex<HashMap<String, Vec<Value>>>,
}

impl MemoryClient {
    /// Insert a row directly, assigning an id. Returns the id.
    pub fn seed(&self, table: &str, mut row: Value) -> Uuid {
        let id = Uuid::new_v4();
        row["id"] = Value::String(id.to_string());
        self.tables
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default()
            .push(row);
        id
    }

    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .cloned()
            .unwrap_or_default()
    }
}

fn matches(row: &Value, query: &Query) -> bool {
    query.filters().iter().all(|f| match &row[&f.column] {
        Value::String(s) => *s == f.value,
        Value::Null => false,
        other => other.to_string() == f.value,
    })
}

#[async_trait]
impl TableClient for MemoryClient {
    async fn execute(&self, query: Query) -> Result<QueryResponse, DbError> {
        let mut tables = self.tables.lock().unwrap();
        let rows = tables.entry(query.table().to_string()).or_default();

        let data = match query.operation() {
            Operation::Select { .. } => {
                let mut found: Vec<Value> =
                    rows.iter().filter(|r| matches(r, &query)).cloned().collect();
                if let Some(limit) = query.row_limit() {
                    found.truncate(limit);
                }
                found
            }
            Operation::Insert { payload } => {
                let mut row = payload.clone();
                row["id"] = Value::String(Uuid::new_v4().to_string());
                rows.push(row.clone());
                vec![row]
            }
            Operation::Update { payload } => {
                let mut updated = Vec::new();
                for row in rows.iter_mut().filter(|r| matches(r, &query)) {
                    if let (Some(target), Some(fields)) = (row.as_object_mut(), payload.as_object())
                    {
                        for (k, v) in fields {
                            target.insert(k.clone(), v.clone());
                        }
                    }
                    updated.push(row.clone());
                }
                updated
            }
            Operation::Delete => {
                let (removed, kept): (Vec<Value>, Vec<Value>) =
                    rows.drain(..).partition(|r| matches(r, &query));
                *rows = kept;
                removed
            }
        };

        let count = query.wants_count().then_some(data.len() as i64);
        Ok(QueryResponse { data, count })
    }
}

/// Backend that fails every call.
pub struct FailingClient;

#[async_trait]
impl TableClient for FailingClient {
    async fn execute(&self, _query: Query) -> Result<QueryResponse, DbError> {
        Err(DbError::Api {
            status: 503,
            code: None,
            message: "backend unavailable".into(),
        })
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

pub fn test_settings() -> Settings {
    Settings {
        version: "1.0.0-test".into(),
        api_url: "http://backend.invalid".into(),
        api_key: "test-key".into(),
        environment: Environment::Local,
        debug: false,
    }
}

/// Build the full application router, backed by `client`.
///
/// Uses the same builder as `main.rs`, so tests exercise the production
/// middleware stack.
pub fn build_test_app(client: Arc<dyn TableClient>) -> Router {
    build_app_router(AppState {
        client,
        settings: Arc::new(test_settings()),
        config: Arc::new(test_config()),
    })
}

pub async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
