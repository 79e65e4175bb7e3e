//! Handlers for product reviews and their moderation.
//!
//! Every write that can change the set of approved reviews ends with
//! [`ProductRepo::refresh_rating`], so the cached `rating` / `review_count`
//! on the product never drift from the review table.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use furnicraft_core::error::CoreError;
use furnicraft_core::review::{
    validate_moderation_status, validate_review_status, MAX_COMMENT_LENGTH, MAX_RATING,
    MIN_COMMENT_LENGTH, MIN_RATING,
};
use furnicraft_core::types::DbId;
use furnicraft_db::models::review::{CreateReview, Review, ReviewListParams};
use furnicraft_db::repositories::{ProductRepo, ReviewRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /reviews`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateReviewRequest {
    pub product_id: DbId,
    #[validate(range(
        min = MIN_RATING,
        max = MAX_RATING,
        message = "Rating must be between 1 and 5"
    ))]
    pub rating: i16,
    #[validate(length(max = 200))]
    pub title: Option<String>,
    #[validate(length(
        min = MIN_COMMENT_LENGTH,
        max = MAX_COMMENT_LENGTH,
        message = "Comment must be between 10 and 2000 characters"
    ))]
    pub comment: String,
    #[validate(length(min = 1, max = 100, message = "Reviewer name is required"))]
    pub reviewer_name: String,
    #[validate(email)]
    pub reviewer_email: Option<String>,
}

/// Request body for `PUT /reviews/{id}/moderate`.
#[derive(Debug, Deserialize)]
pub struct ModerateReviewRequest {
    pub status: String,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Review",
        id,
    })
}

/// POST /api/v1/reviews
///
/// Open to anonymous visitors. A signed-in caller is recorded as the author.
/// The review starts in `pending` and does not count until approved.
pub async fn create_review(
    State(state): State<AppState>,
    caller: Option<AuthUser>,
    Json(input): Json<CreateReviewRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Review>>)> {
    input.validate()?;
    let product_id = input.product_id;

    ProductRepo::find_by_id(&state.pool, product_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id: product_id,
        }))?;

    let review = ReviewRepo::create(
        &state.pool,
        &CreateReview {
            product_id,
            user_id: caller.map(|u| u.user_id),
            rating: input.rating,
            title: input.title,
            comment: input.comment,
            reviewer_name: input.reviewer_name,
            reviewer_email: input.reviewer_email,
        },
    )
    .await?;
    ProductRepo::refresh_rating(&state.pool, product_id).await?;

    tracing::info!(review_id = %review.id, product_id = %product_id, "Review submitted");
    Ok((StatusCode::CREATED, Json(DataResponse::new(review))))
}

/// GET /api/v1/products/{id}/reviews
pub async fn list_product_reviews(
    State(state): State<AppState>,
    Path(product_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Review>>>> {
    let reviews = ReviewRepo::list_approved_for_product(&state.pool, product_id).await?;
    Ok(Json(DataResponse::new(reviews)))
}

/// GET /api/v1/reviews
///
/// Moderation queue. Defaults to `pending`, oldest first.
pub async fn list_reviews(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Query(params): Query<ReviewListParams>,
) -> AppResult<Json<DataResponse<Vec<Review>>>> {
    if let Some(status) = &params.status {
        validate_review_status(status)?;
    }
    let reviews = ReviewRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse::new(reviews)))
}

/// PUT /api/v1/reviews/{id}/moderate
pub async fn moderate_review(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<ModerateReviewRequest>,
) -> AppResult<Json<DataResponse<Review>>> {
    validate_moderation_status(&input.status)?;

    let review = ReviewRepo::set_status(&state.pool, id, &input.status)
        .await?
        .ok_or_else(|| not_found(id))?;
    ProductRepo::refresh_rating(&state.pool, review.product_id).await?;

    tracing::info!(
        review_id = %id,
        status = %review.status,
        moderator_id = %user.user_id,
        "Review moderated",
    );
    Ok(Json(DataResponse::new(review)))
}

/// DELETE /api/v1/reviews/{id}
pub async fn delete_review(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let review = ReviewRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    ProductRepo::refresh_rating(&state.pool, review.product_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
