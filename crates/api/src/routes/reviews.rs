//! Route definitions for the `/reviews` resource.
//!
//! The public per-product listing lives under `/products/{id}/reviews`.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::reviews;
use crate::state::AppState;

/// Routes mounted at `/reviews`.
///
/// ```text
/// POST   /                -> create_review (public)
/// GET    /                -> list_reviews (staff)
/// PUT    /{id}/moderate   -> moderate_review (staff)
/// DELETE /{id}            -> delete_review (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(reviews::list_reviews).post(reviews::create_review))
        .route("/{id}/moderate", put(reviews::moderate_review))
        .route("/{id}", delete(reviews::delete_review))
}
