//! Route definitions for the `/categories` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::categories;
use crate::state::AppState;

/// Routes mounted at `/categories`.
///
/// ```text
/// GET    /              -> list_categories (tree)
/// POST   /              -> create_category (staff)
/// GET    /slug/{slug}   -> get_category_by_slug
/// PUT    /{id}          -> update_category (staff)
/// DELETE /{id}          -> delete_category (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(categories::list_categories).post(categories::create_category),
        )
        .route("/slug/{slug}", get(categories::get_category_by_slug))
        .route(
            "/{id}",
            put(categories::update_category).delete(categories::delete_category),
        )
}
