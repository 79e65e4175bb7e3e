//! Route definitions for the `/blog` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::blog;
use crate::state::AppState;

/// Routes mounted at `/blog`.
///
/// ```text
/// GET    /              -> list_posts
/// POST   /              -> create_post (staff)
/// GET    /slug/{slug}   -> get_post_by_slug
/// PUT    /{id}          -> update_post (staff)
/// DELETE /{id}          -> delete_post (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(blog::list_posts).post(blog::create_post))
        .route("/slug/{slug}", get(blog::get_post_by_slug))
        .route("/{id}", put(blog::update_post).delete(blog::delete_post))
}
