pub mod admin;
pub mod auth;
pub mod blog;
pub mod categories;
pub mod contacts;
pub mod health;
pub mod orders;
pub mod products;
pub mod projects;
pub mod reviews;
pub mod tags;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                      register (public)
/// /auth/login                         login (public)
/// /auth/me                            current user (requires auth)
///
/// /admin/users                        list, create (admin only)
/// /admin/users/{id}                   get, update, delete
///
/// /products                           list, create
/// /products/{id}                      get, update, archive
/// /products/{id}/tags                 replace tags
/// /products/{id}/reviews              approved reviews
///
/// /categories                         tree, create
/// /categories/slug/{slug}             get with children
/// /categories/{id}                    update, delete
///
/// /tags                               list, create
/// /tags/{id}                          update, archive
///
/// /blog                               list, create
/// /blog/slug/{slug}                   get with tags
/// /blog/{id}                          update, delete
///
/// /projects                           list, create
/// /projects/{id}                      get, update, soft delete
///
/// /reviews                            submit, moderation queue
/// /reviews/{id}/moderate              approve / reject / spam
/// /reviews/{id}                       delete
///
/// /orders                             place, list
/// /orders/mine                        caller's orders
/// /orders/track/{order_number}        public tracking
/// /orders/{id}                        get
/// /orders/{id}/status                 update status
///
/// /contacts                           submit, list
/// /contacts/{id}                      update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
        .nest("/products", products::router())
        .nest("/categories", categories::router())
        .nest("/tags", tags::router())
        .nest("/blog", blog::router())
        .nest("/projects", projects::router())
        .nest("/reviews", reviews::router())
        .nest("/orders", orders::router())
        .nest("/contacts", contacts::router())
}
