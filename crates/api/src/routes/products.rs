//! Route definitions for the `/products` resource, including its reviews.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{products, reviews};
use crate::state::AppState;

/// Routes mounted at `/products`.
///
/// ```text
/// GET    /                -> list_products
/// POST   /                -> create_product (staff)
/// GET    /{id}            -> get_product
/// PUT    /{id}            -> update_product (staff)
/// DELETE /{id}            -> archive_product (staff)
/// PUT    /{id}/tags       -> replace_product_tags (staff)
/// GET    /{id}/reviews    -> list_product_reviews
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::archive_product),
        )
        .route("/{id}/tags", put(products::replace_product_tags))
        .route("/{id}/reviews", get(reviews::list_product_reviews))
}
