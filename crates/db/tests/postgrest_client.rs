//! Integration tests for `PostgrestClient` and the repositories.
//!
//! A small axum app stands in for the backend's REST interface so the
//! real HTTP path (headers, query grammar, `Content-Range`) is exercised.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use assert_matches::assert_matches;
use axum::extract::{Path, Query as UrlQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use micropos_db::models::category::{CreateCategory, UpdateCategory};
use micropos_db::models::item::CreateItem;
use micropos_db::repositories::{CategoryRepo, ItemRepo};
use micropos_db::{health_check, DbError, PostgrestClient};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use uuid::Uuid;

const API_KEY: &str = "test-anon-key";

type Tables = Arc<Mutex<HashMap<String, Vec<Value>>>>;

// ---------------------------------------------------------------------------
// Stub backend
// ---------------------------------------------------------------------------

fn authorized(headers: &HeaderMap) -> bool {
    let bearer = format!("Bearer {API_KEY}");
    headers.get("apikey").and_then(|v| v.to_str().ok()) == Some(API_KEY)
        && headers.get("authorization").and_then(|v| v.to_str().ok()) == Some(bearer.as_str())
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "No API key found in request" })),
    )
        .into_response()
}

/// Keep rows matching every `col=eq.value` parameter.
fn matches(row: &Value, params: &HashMap<String, String>) -> bool {
    params.iter().all(|(column, raw)| match raw.strip_prefix("eq.") {
        Some(expected) => match &row[column] {
            Value::String(s) => s == expected,
            Value::Bool(b) => b.to_string() == expected,
            Value::Null => false,
            other => other.to_string() == expected,
        },
        None => true,
    })
}

async fn select_rows(
    State(tables): State<Tables>,
    Path(table): Path<String>,
    headers: HeaderMap,
    UrlQuery(params): UrlQuery<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    if table == "broken" {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "code": "XX000", "message": "relation exploded" })),
        )
            .into_response();
    }

    let tables = tables.lock().unwrap();
    let mut rows: Vec<Value> = tables
        .get(&table)
        .map(|rows| rows.iter().filter(|r| matches(r, &params)).cloned().collect())
        .unwrap_or_default();
    if let Some(limit) = params.get("limit").and_then(|l| l.parse::<usize>().ok()) {
        rows.truncate(limit);
    }

    let range = if rows.is_empty() {
        "*/0".to_string()
    } else {
        format!("0-{}/{}", rows.len() - 1, rows.len())
    };
    ([("content-range", range)], Json(Value::Array(rows))).into_response()
}

async fn insert_row(
    State(tables): State<Tables>,
    Path(table): Path<String>,
    headers: HeaderMap,
    Json(mut row): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    row["id"] = json!(Uuid::new_v4());
    tables
        .lock()
        .unwrap()
        .entry(table)
        .or_default()
        .push(row.clone());
    (StatusCode::CREATED, Json(json!([row]))).into_response()
}

async fn update_rows(
    State(tables): State<Tables>,
    Path(table): Path<String>,
    headers: HeaderMap,
    UrlQuery(params): UrlQuery<HashMap<String, String>>,
    Json(patch): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut tables = tables.lock().unwrap();
    let mut updated = Vec::new();
    for row in tables.entry(table).or_default().iter_mut() {
        if matches(row, &params) {
            if let (Some(target), Some(fields)) = (row.as_object_mut(), patch.as_object()) {
                for (k, v) in fields {
                    target.insert(k.clone(), v.clone());
                }
            }
            updated.push(row.clone());
        }
    }
    Json(Value::Array(updated)).into_response()
}

async fn delete_rows(
    State(tables): State<Tables>,
    Path(table): Path<String>,
    headers: HeaderMap,
    UrlQuery(params): UrlQuery<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut tables = tables.lock().unwrap();
    let rows = tables.entry(table).or_default();
    let (removed, kept): (Vec<Value>, Vec<Value>) =
        rows.drain(..).partition(|r| matches(r, &params));
    *rows = kept;
    Json(Value::Array(removed)).into_response()
}

/// Start the stub backend and return its base URL.
async fn spawn_backend() -> String {
    let tables: Tables = Arc::default();
    let app = Router::new()
        .route(
            "/rest/v1/{table}",
            get(select_rows)
                .post(insert_row)
                .patch(update_rows)
                .delete(delete_rows),
        )
        .with_state(tables);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn new_item(title: &str, price: &str, is_available: bool) -> CreateItem {
    CreateItem {
        title: title.to_string(),
        title_full: None,
        description: Some("A hearty bowl".into()),
        categories: Some(vec![Uuid::new_v4()]),
        price: price.parse::<Decimal>().unwrap(),
        image_uri: None,
        created_at: Some(chrono::Utc::now()),
        is_available,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn category_crud_round_trip() {
    let base = spawn_backend().await;
    let client = PostgrestClient::new(&base, API_KEY).unwrap();

    let created = CategoryRepo::create(
        &client,
        &CreateCategory {
            title: "Mains".into(),
            image_uri: None,
            created_at: None,
            is_available: true,
        },
    )
    .await
    .unwrap();
    let id = created.id.expect("backend assigns an id");
    assert_eq!(created.title.as_deref(), Some("Mains"));

    let fetched = CategoryRepo::find_by_id(&client, id).await.unwrap();
    assert_eq!(fetched.count, Some(1));
    assert_eq!(fetched.rows, vec![created.clone()]);

    let updated = CategoryRepo::update(
        &client,
        id,
        &UpdateCategory {
            title: Some("Sides".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .expect("row should match");
    assert_eq!(updated.title.as_deref(), Some("Sides"));
    assert_eq!(updated.is_available, Some(true));

    let deleted = CategoryRepo::delete(&client, id).await.unwrap();
    assert_eq!(deleted.and_then(|c| c.id), Some(id));

    let gone = CategoryRepo::find_by_id(&client, id).await.unwrap();
    assert!(gone.rows.is_empty());
    assert_eq!(gone.count, Some(0));
}

#[tokio::test]
async fn item_list_filters_by_availability() {
    let base = spawn_backend().await;
    let client = PostgrestClient::new(&base, API_KEY).unwrap();

    ItemRepo::create(&client, &new_item("Fresh Soup", "6.5", true))
        .await
        .unwrap();
    ItemRepo::create(&client, &new_item("Spicy Curry", "12.00", false))
        .await
        .unwrap();

    let all = ItemRepo::list(&client, None).await.unwrap();
    assert_eq!(all.count, Some(2));

    let available = ItemRepo::list(&client, Some(true)).await.unwrap();
    assert_eq!(available.rows.len(), 1);
    assert_eq!(available.rows[0].title.as_deref(), Some("Fresh Soup"));
    assert_eq!(available.rows[0].price.to_string(), "6.50");
}

#[tokio::test]
async fn update_and_delete_of_missing_row_return_none() {
    let base = spawn_backend().await;
    let client = PostgrestClient::new(&base, API_KEY).unwrap();
    let missing = Uuid::new_v4();

    let updated = CategoryRepo::update(&client, missing, &UpdateCategory::default())
        .await
        .unwrap();
    assert!(updated.is_none());
    assert!(ItemRepo::delete(&client, missing).await.unwrap().is_none());
}

#[tokio::test]
async fn wrong_api_key_surfaces_as_api_error() {
    let base = spawn_backend().await;
    let client = PostgrestClient::new(&base, "not-the-key").unwrap();

    let err = ItemRepo::list(&client, None).await.unwrap_err();
    assert_matches!(
        err,
        DbError::Api { status: 401, ref message, .. } if message == "No API key found in request"
    );
}

#[tokio::test]
async fn backend_failure_keeps_code_and_message() {
    let base = spawn_backend().await;
    let client = PostgrestClient::new(&base, API_KEY).unwrap();

    let err = micropos_db::TableClient::execute(&client, micropos_db::Query::select("broken", "*"))
        .await
        .unwrap_err();
    assert_matches!(
        err,
        DbError::Api { status: 500, code: Some(ref code), .. } if code == "XX000"
    );
    assert_eq!(err.kind(), "api");
}

#[tokio::test]
async fn health_check_succeeds_against_live_backend() {
    let base = spawn_backend().await;
    let client = PostgrestClient::new(&base, API_KEY).unwrap();
    assert!(health_check(&client).await.is_ok());
}

#[tokio::test]
async fn unreachable_backend_is_a_request_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = PostgrestClient::new(&format!("http://{addr}"), API_KEY).unwrap();
    let err = health_check(&client).await.unwrap_err();
    assert_matches!(err, DbError::Request(_));
}
