//! HTTP-level tests for review submission, moderation and the cached rating.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_product, delete_auth, get, get_auth, money, post_json, post_json_auth,
    put_json_auth, user_with_token,
};
use furnicraft_core::types::DbId;
use rust_decimal::Decimal;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

async fn submit(pool: &PgPool, product_id: DbId, rating: i16) -> String {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/reviews",
        json!({
            "product_id": product_id,
            "rating": rating,
            "comment": "Sturdy and exactly as pictured.",
            "reviewer_name": "Quinn",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string()
}

async fn moderate(pool: &PgPool, token: &str, review_id: &str, status: &str) -> StatusCode {
    let app = common::build_test_app(pool.clone());
    put_json_auth(
        app,
        &format!("/api/v1/reviews/{review_id}/moderate"),
        json!({ "status": status }),
        token,
    )
    .await
    .status()
}

async fn product_rating(pool: &PgPool, product_id: DbId) -> (Decimal, i64) {
    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, &format!("/api/v1/products/{product_id}")).await).await;
    (
        money(&json["data"]["rating"]),
        json["data"]["review_count"].as_i64().unwrap(),
    )
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn new_reviews_start_pending_and_do_not_count(pool: PgPool) {
    let bed = create_product(&pool, "Platform Bed", Decimal::new(90_000, 2), 2).await;
    submit(&pool, bed.id, 5).await;

    assert_eq!(product_rating(&pool, bed.id).await, (Decimal::ZERO, 0));

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/v1/products/{}/reviews", bed.id)).await).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn moderation_updates_rating(pool: PgPool) {
    let (_staff, token) = user_with_token(&pool, "moderator", "staff").await;
    let bed = create_product(&pool, "Platform Bed", Decimal::new(90_000, 2), 2).await;

    let five = submit(&pool, bed.id, 5).await;
    let four = submit(&pool, bed.id, 4).await;
    let one = submit(&pool, bed.id, 1).await;

    assert_eq!(moderate(&pool, &token, &five, "approved").await, StatusCode::OK);
    assert_eq!(moderate(&pool, &token, &four, "approved").await, StatusCode::OK);
    assert_eq!(moderate(&pool, &token, &one, "spam").await, StatusCode::OK);
    assert_eq!(
        product_rating(&pool, bed.id).await,
        (Decimal::new(450, 2), 2)
    );

    // Rejecting a previously approved review takes it out of the average.
    assert_eq!(moderate(&pool, &token, &four, "rejected").await, StatusCode::OK);
    assert_eq!(product_rating(&pool, bed.id).await, (Decimal::new(5, 0), 1));

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, &format!("/api/v1/products/{}", bed.id)).await).await;
    assert_eq!(json["data"]["reviews"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"]["reviews"][0]["rating"], 5);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn moderation_rejects_unknown_status_and_customers(pool: PgPool) {
    let (_staff, staff_token) = user_with_token(&pool, "mod2", "staff").await;
    let (_customer, customer_token) = user_with_token(&pool, "rando", "customer").await;
    let desk = create_product(&pool, "Standing Desk", Decimal::new(60_000, 2), 2).await;
    let review = submit(&pool, desk.id, 3).await;

    assert_eq!(
        moderate(&pool, &staff_token, &review, "pending").await,
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        moderate(&pool, &customer_token, &review, "approved").await,
        StatusCode::FORBIDDEN
    );
    assert_eq!(
        moderate(&pool, &staff_token, &Uuid::new_v4().to_string(), "approved").await,
        StatusCode::NOT_FOUND
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn review_validation(pool: PgPool) {
    let desk = create_product(&pool, "Standing Desk", Decimal::new(60_000, 2), 2).await;
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/reviews",
        json!({
            "product_id": desk.id,
            "rating": 6,
            "comment": "Far too short",
            "reviewer_name": "R",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["errors"][0]["field"], "rating");

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/reviews",
        json!({
            "product_id": desk.id,
            "rating": 4,
            "comment": "too short",
            "reviewer_name": "R",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["errors"][0]["field"], "comment");

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/reviews",
        json!({
            "product_id": Uuid::new_v4(),
            "rating": 4,
            "comment": "Long enough comment",
            "reviewer_name": "R",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn signed_in_review_links_user(pool: PgPool) {
    let (user, token) = user_with_token(&pool, "reviewer", "customer").await;
    let lamp = create_product(&pool, "Floor Lamp", Decimal::new(15_000, 2), 2).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/reviews",
        json!({
            "product_id": lamp.id,
            "rating": 4,
            "comment": "Warm light, solid base.",
            "reviewer_name": "Reviewer",
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["user_id"], user.id.to_string());
    assert_eq!(json["data"]["status"], "pending");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn queue_and_admin_delete(pool: PgPool) {
    let (_staff, staff_token) = user_with_token(&pool, "queue", "staff").await;
    let (_admin, admin_token) = user_with_token(&pool, "boss", "admin").await;
    let rug = create_product(&pool, "Wool Rug", Decimal::new(30_000, 2), 2).await;

    let first = submit(&pool, rug.id, 2).await;
    submit(&pool, rug.id, 4).await;

    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, "/api/v1/reviews", &staff_token).await).await;
    let queue = json["data"].as_array().unwrap();
    assert_eq!(queue.len(), 2);
    assert_eq!(queue[0]["id"], first);

    assert_eq!(moderate(&pool, &staff_token, &first, "approved").await, StatusCode::OK);
    assert_eq!(product_rating(&pool, rug.id).await, (Decimal::new(2, 0), 1));

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/v1/reviews/{first}"), &staff_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/v1/reviews/{first}"), &admin_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Deleting the only approved review clears the cached rating.
    assert_eq!(product_rating(&pool, rug.id).await, (Decimal::ZERO, 0));
}
