//! Route definitions for categories.
//!
//! ```text
//! GET    /category            list_categories (?available=)
//! GET    /category/           list_categories (?available=)
//! POST   /category/create     create_category
//! GET    /category/{id}       get_category
//! PATCH  /category/{id}       update_category
//! DELETE /category/{id}       delete_category
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::category;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/category", get(category::list_categories))
        .route("/category/", get(category::list_categories))
        .route("/category/create", post(category::create_category))
        .route(
            "/category/{id}",
            get(category::get_category)
                .patch(category::update_category)
                .delete(category::delete_category),
        )
}
