#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use furnicraft_core::lockout::LockoutPolicy;
use furnicraft_core::types::DbId;
use furnicraft_db::models::product::{CreateProduct, Product};
use furnicraft_db::models::user::{CreateUser, User};
use furnicraft_db::repositories::{ProductRepo, UserRepo};
use rust_decimal::Decimal;
use furnicraft_db::PoolSettings;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use furnicraft_api::auth::jwt::{generate_access_token, JwtConfig};
use furnicraft_api::auth::password::{hash_password, PasswordConfig};
use furnicraft_api::config::ServerConfig;
use furnicraft_api::router::build_app_router;
use furnicraft_api::state::AppState;

/// Plaintext password of every user created by [`create_user`].
pub const TEST_PASSWORD: &str = "correct-horse-9";

/// Build a test `ServerConfig` with cheap password hashing and a fixed secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        pool: PoolSettings::default(),
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        },
        lockout: LockoutPolicy::default(),
        password: PasswordConfig {
            time_cost: 1,
            memory_kib: 1024,
        },
    }
}

/// The full application router, with the production middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a user with [`TEST_PASSWORD`] directly through the repository.
pub async fn create_user(pool: &PgPool, username: &str, role: &str) -> User {
    let password_hash = hash_password(TEST_PASSWORD, &test_config().password).unwrap();
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash,
            role: role.to_string(),
            first_name: None,
            last_name: None,
        },
    )
    .await
    .unwrap()
}

/// Mint an access token for `user_id` without going through `/auth/login`.
pub fn token_for(user_id: DbId, role: &str) -> String {
    generate_access_token(user_id, role, &test_config().jwt).unwrap()
}

/// Create a user of the given role and return it with a valid token.
pub async fn user_with_token(pool: &PgPool, username: &str, role: &str) -> (User, String) {
    let user = create_user(pool, username, role).await;
    let token = token_for(user.id, &user.role);
    (user, token)
}

/// Insert an active product priced at `price` with `stock` units.
pub async fn create_product(pool: &PgPool, name: &str, price: Decimal, stock: i32) -> Product {
    ProductRepo::create(
        pool,
        &CreateProduct {
            name: name.to_string(),
            description: None,
            short_description: None,
            price,
            stock_quantity: Some(stock),
            in_stock: None,
            category_id: None,
            material: None,
            dimensions: None,
            images: None,
            featured: None,
            status: None,
        },
    )
    .await
    .unwrap()
}

/// Parse a serialized money amount (`"266.00"`) from a JSON value.
pub fn money(value: &serde_json::Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
