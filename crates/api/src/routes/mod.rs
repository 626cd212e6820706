pub mod category;
pub mod health;
pub mod item;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree.
///
/// Route hierarchy:
///
/// ```text
/// /category/                 list
/// /category/create           create (POST)
/// /category/{id}             get, update (PATCH), delete
///
/// /item/                     list
/// /item/create               create (POST)
/// /item/{id}                 get, update (PATCH), delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(category::router())
        .merge(item::router())
}
