//! Route definitions for the `/tags` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::tags;
use crate::state::AppState;

/// Routes mounted at `/tags`.
///
/// ```text
/// GET    /       -> list_tags
/// POST   /       -> create_tag (staff)
/// PUT    /{id}   -> update_tag (staff)
/// DELETE /{id}   -> archive_tag (staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tags::list_tags).post(tags::create_tag))
        .route("/{id}", put(tags::update_tag).delete(tags::archive_tag))
}
