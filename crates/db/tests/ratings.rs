//! Integration tests for review moderation and the cached product rating.

use furnicraft_db::models::product::{CreateProduct, Product};
use furnicraft_db::models::review::CreateReview;
use furnicraft_db::repositories::{ProductRepo, ReviewRepo};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

async fn seed_product(pool: &PgPool) -> Product {
    ProductRepo::create(
        pool,
        &CreateProduct {
            name: "Armchair".to_string(),
            description: None,
            short_description: None,
            price: Decimal::from(250),
            stock_quantity: Some(4),
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

async fn review(pool: &PgPool, product_id: Uuid, rating: i16, status: &str) -> Uuid {
    let created = ReviewRepo::create(
        pool,
        &CreateReview {
            product_id,
            user_id: None,
            rating,
            title: None,
            comment: "Sturdy and comfortable.".to_string(),
            reviewer_name: "Sam".to_string(),
            reviewer_email: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(created.status, "pending");
    if status != "pending" {
        ReviewRepo::set_status(pool, created.id, status)
            .await
            .unwrap()
            .unwrap();
    }
    created.id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rating_counts_only_approved_reviews(pool: PgPool) {
    let product = seed_product(&pool).await;
    review(&pool, product.id, 5, "approved").await;
    review(&pool, product.id, 4, "approved").await;
    review(&pool, product.id, 3, "approved").await;
    review(&pool, product.id, 1, "pending").await;
    review(&pool, product.id, 1, "spam").await;

    let refreshed = ProductRepo::refresh_rating(&pool, product.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(refreshed.rating, Decimal::from(4));
    assert_eq!(refreshed.review_count, 3);

    let approved = ReviewRepo::list_approved_for_product(&pool, product.id)
        .await
        .unwrap();
    assert_eq!(approved.len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_no_approved_reviews_leaves_rating_unchanged(pool: PgPool) {
    let product = seed_product(&pool).await;
    review(&pool, product.id, 2, "pending").await;

    let refreshed = ProductRepo::refresh_rating(&pool, product.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(refreshed.rating, Decimal::ZERO);
    assert_eq!(refreshed.review_count, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rejecting_a_review_updates_rating(pool: PgPool) {
    let product = seed_product(&pool).await;
    review(&pool, product.id, 5, "approved").await;
    let bad = review(&pool, product.id, 2, "approved").await;
    let refreshed = ProductRepo::refresh_rating(&pool, product.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(refreshed.rating, Decimal::new(350, 2));

    ReviewRepo::set_status(&pool, bad, "rejected").await.unwrap();
    let refreshed = ProductRepo::refresh_rating(&pool, product.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(refreshed.rating, Decimal::from(5));
    assert_eq!(refreshed.review_count, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_losing_last_approved_review_resets_rating(pool: PgPool) {
    let product = seed_product(&pool).await;
    let only = review(&pool, product.id, 5, "approved").await;
    let refreshed = ProductRepo::refresh_rating(&pool, product.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!((refreshed.rating, refreshed.review_count), (Decimal::from(5), 1));

    ReviewRepo::set_status(&pool, only, "rejected").await.unwrap();
    let refreshed = ProductRepo::refresh_rating(&pool, product.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(refreshed.rating, Decimal::ZERO);
    assert_eq!(refreshed.review_count, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_refresh_missing_product_returns_none(pool: PgPool) {
    let result = ProductRepo::refresh_rating(&pool, Uuid::new_v4())
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_moderation_queue_defaults_to_pending(pool: PgPool) {
    let product = seed_product(&pool).await;
    let pending = review(&pool, product.id, 4, "pending").await;
    review(&pool, product.id, 5, "approved").await;

    let queue = ReviewRepo::list(&pool, &Default::default()).await.unwrap();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].id, pending);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rating_out_of_range_violates_check(pool: PgPool) {
    let product = seed_product(&pool).await;
    let err = ReviewRepo::create(
        &pool,
        &CreateReview {
            product_id: product.id,
            user_id: None,
            rating: 6,
            title: None,
            comment: "Too good to be true".to_string(),
            reviewer_name: "Sam".to_string(),
            reviewer_email: None,
        },
    )
    .await
    .unwrap_err();
    let db_err = err.as_database_error().unwrap();
    assert_eq!(db_err.constraint(), Some("ck_reviews_rating"));
}
