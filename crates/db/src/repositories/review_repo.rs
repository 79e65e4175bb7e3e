//! Repository for the `reviews` table.
//!
//! Callers refresh the product's cached rating after every write here via
//! [`ProductRepo::refresh_rating`](crate::repositories::ProductRepo::refresh_rating).

use furnicraft_core::review::{REVIEW_STATUS_APPROVED, REVIEW_STATUS_PENDING};
use furnicraft_core::search::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use furnicraft_core::types::DbId;
use sqlx::PgPool;

use crate::models::review::{CreateReview, Review, ReviewListParams};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, product_id, user_id, rating, title, comment, reviewer_name, \
                        reviewer_email, status, created_at, updated_at";

/// Provides CRUD and moderation operations for reviews.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert a new review in `pending` status.
    pub async fn create(pool: &PgPool, input: &CreateReview) -> Result<Review, sqlx::Error> {
        let query = format!(
            "INSERT INTO reviews
                (product_id, user_id, rating, title, comment, reviewer_name, reviewer_email, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(input.product_id)
            .bind(input.user_id)
            .bind(input.rating)
            .bind(&input.title)
            .bind(&input.comment)
            .bind(&input.reviewer_name)
            .bind(&input.reviewer_email)
            .bind(REVIEW_STATUS_PENDING)
            .fetch_one(pool)
            .await
    }

    /// Find a review by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews WHERE id = $1");
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Approved reviews of a product, newest first.
    pub async fn list_approved_for_product(
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reviews
             WHERE product_id = $1 AND status = $2
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(product_id)
            .bind(REVIEW_STATUS_APPROVED)
            .fetch_all(pool)
            .await
    }

    /// Moderation queue. `status` defaults to `pending`; oldest first.
    pub async fn list(pool: &PgPool, params: &ReviewListParams) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reviews
             WHERE status = $1 AND ($2::uuid IS NULL OR product_id = $2)
             ORDER BY created_at ASC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(params.status.as_deref().unwrap_or(REVIEW_STATUS_PENDING))
            .bind(params.product_id)
            .bind(clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    /// Set the moderation status of a review.
    ///
    /// Returns `None` if no review with the given ID exists.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("UPDATE reviews SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a review, returning the deleted row.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("DELETE FROM reviews WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
