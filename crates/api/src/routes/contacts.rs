//! Route definitions for the `/contacts` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::contacts;
use crate::state::AppState;

/// Routes mounted at `/contacts`.
///
/// ```text
/// POST   /       -> submit_contact (public)
/// GET    /       -> list_contacts (staff)
/// PUT    /{id}   -> update_contact (staff)
/// DELETE /{id}   -> delete_contact (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(contacts::list_contacts).post(contacts::submit_contact),
        )
        .route(
            "/{id}",
            put(contacts::update_contact).delete(contacts::delete_contact),
        )
}
