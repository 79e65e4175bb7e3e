//! Handlers for the `/tags` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use furnicraft_core::catalog::{validate_color, validate_tag_status};
use furnicraft_core::error::CoreError;
use furnicraft_core::slug::{slug_on_create, slug_on_update};
use furnicraft_core::types::DbId;
use furnicraft_db::models::tag::{CreateTag, Tag, TagListParams, UpdateTag};
use furnicraft_db::repositories::TagRepo;
use serde::Deserialize;
use sqlx::PgPool;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTagRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    pub slug: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTagRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,
    pub slug: Option<String>,
    pub color: Option<String>,
    pub status: Option<String>,
}

/// GET /api/v1/tags
pub async fn list_tags(
    State(state): State<AppState>,
    Query(params): Query<TagListParams>,
) -> AppResult<Json<DataResponse<Vec<Tag>>>> {
    let tags = TagRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse::new(tags)))
}

/// POST /api/v1/tags
pub async fn create_tag(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Json(input): Json<CreateTagRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Tag>>)> {
    input.validate()?;
    if let Some(color) = &input.color {
        validate_color(color)?;
    }
    let slug = slug_on_create(&input.name, input.slug.as_deref())?;

    let tag = TagRepo::create(
        &state.pool,
        &CreateTag {
            name: input.name,
            slug,
            color: input.color,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(tag))))
}

/// PUT /api/v1/tags/{id}
pub async fn update_tag(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTagRequest>,
) -> AppResult<Json<DataResponse<Tag>>> {
    input.validate()?;
    if let Some(color) = &input.color {
        validate_color(color)?;
    }
    if let Some(status) = &input.status {
        validate_tag_status(status)?;
    }

    let not_found = || AppError::Core(CoreError::NotFound { entity: "Tag", id });
    let current = TagRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;
    let slug = slug_on_update(
        &current.name,
        &current.slug,
        input.name.as_deref(),
        input.slug.as_deref(),
    )?;

    let tag = TagRepo::update(
        &state.pool,
        id,
        &UpdateTag {
            name: input.name,
            slug,
            color: input.color,
            status: input.status,
        },
    )
    .await?
    .ok_or_else(not_found)?;
    Ok(Json(DataResponse::new(tag)))
}

/// DELETE /api/v1/tags/{id}
///
/// Tags are archived rather than removed so existing associations survive.
pub async fn archive_tag(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if TagRepo::archive(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Tag", id }))
    }
}

/// Fail with a validation error if any of `tag_ids` is unknown.
///
/// Called before the owning row is written so a bad tag list leaves nothing
/// behind. Tags are archived, never deleted, so a passing check stays valid.
pub(crate) async fn ensure_tags_exist(pool: &PgPool, tag_ids: &[DbId]) -> AppResult<()> {
    if tag_ids.is_empty() {
        return Ok(());
    }
    match TagRepo::missing_ids(pool, tag_ids).await?.first() {
        Some(id) => Err(CoreError::Validation(format!("Tag with ID {id} not found")).into()),
        None => Ok(()),
    }
}
