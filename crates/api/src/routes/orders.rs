//! Route definitions for the `/orders` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::orders;
use crate::state::AppState;

/// Routes mounted at `/orders`.
///
/// ```text
/// POST /                        -> place_order (guest or signed in)
/// GET  /                        -> list_orders (staff)
/// GET  /mine                    -> list_my_orders (requires auth)
/// GET  /track/{order_number}    -> track_order
/// GET  /{id}                    -> get_order (owner or staff)
/// PUT  /{id}/status             -> update_order_status (staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::list_orders).post(orders::place_order))
        .route("/mine", get(orders::list_my_orders))
        .route("/track/{order_number}", get(orders::track_order))
        .route("/{id}", get(orders::get_order))
        .route("/{id}/status", put(orders::update_order_status))
}
