//! Route definitions for menu items.
//!
//! ```text
//! GET    /item            list_items (?available=)
//! GET    /item/           list_items (?available=)
//! POST   /item/create     create_item
//! GET    /item/{id}       get_item
//! PATCH  /item/{id}       update_item
//! DELETE /item/{id}       delete_item
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::item;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/item", get(item::list_items))
        .route("/item/", get(item::list_items))
        .route("/item/create", post(item::create_item))
        .route(
            "/item/{id}",
            get(item::get_item)
                .patch(item::update_item)
                .delete(item::delete_item),
        )
}
