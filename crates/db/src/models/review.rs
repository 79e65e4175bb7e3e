//! Product review model and DTOs.

use furnicraft_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `reviews` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: DbId,
    pub product_id: DbId,
    pub user_id: Option<DbId>,
    pub rating: i16,
    pub title: Option<String>,
    pub comment: String,
    pub reviewer_name: String,
    pub reviewer_email: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a review. New reviews always start as `pending`.
#[derive(Debug, Clone)]
pub struct CreateReview {
    pub product_id: DbId,
    pub user_id: Option<DbId>,
    pub rating: i16,
    pub title: Option<String>,
    pub comment: String,
    pub reviewer_name: String,
    pub reviewer_email: Option<String>,
}

/// Query parameters for the moderation queue `GET /api/v1/reviews`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewListParams {
    /// Defaults to `pending`.
    pub status: Option<String>,
    pub product_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
