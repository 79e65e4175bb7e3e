//! Handlers for the `/categories` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use furnicraft_core::error::CoreError;
use furnicraft_core::slug::{slug_on_create, slug_on_update};
use furnicraft_core::types::DbId;
use furnicraft_db::models::category::{
    Category, CategoryListParams, CategoryTree, CreateCategory, UpdateCategory,
};
use furnicraft_db::repositories::CategoryRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /categories`. `slug` is derived from `name` when omitted.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub slug: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub parent_id: Option<DbId>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// Request body for `PUT /categories/{id}`. A new `name` re-derives the slug
/// unless a slug is given too.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub slug: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub parent_id: Option<DbId>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Category",
        id,
    })
}

/// GET /api/v1/categories
pub async fn list_categories(
    State(state): State<AppState>,
    Query(params): Query<CategoryListParams>,
) -> AppResult<Json<DataResponse<Vec<CategoryTree>>>> {
    let tree = CategoryRepo::list_tree(&state.pool, &params).await?;
    Ok(Json(DataResponse::new(tree)))
}

/// GET /api/v1/categories/slug/{slug}
pub async fn get_category_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<CategoryTree>>> {
    let category = CategoryRepo::find_by_slug(&state.pool, &slug)
        .await?
        .filter(|c| c.is_active)
        .ok_or_else(|| AppError::NotFound(format!("Category with slug '{slug}' not found")))?;
    let children = CategoryRepo::list_children(&state.pool, category.id, false).await?;
    Ok(Json(DataResponse::new(CategoryTree { category, children })))
}

/// POST /api/v1/categories
pub async fn create_category(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Json(input): Json<CreateCategoryRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Category>>)> {
    input.validate()?;
    let slug = slug_on_create(&input.name, input.slug.as_deref())?;

    let category = CategoryRepo::create(
        &state.pool,
        &CreateCategory {
            name: input.name,
            slug,
            description: input.description,
            image_url: input.image_url,
            parent_id: input.parent_id,
            sort_order: input.sort_order,
            is_active: input.is_active,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(category))))
}

/// PUT /api/v1/categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategoryRequest>,
) -> AppResult<Json<DataResponse<Category>>> {
    input.validate()?;
    if input.parent_id == Some(id) {
        return Err(CoreError::Validation("A category cannot be its own parent".into()).into());
    }

    let current = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let slug = slug_on_update(
        &current.name,
        &current.slug,
        input.name.as_deref(),
        input.slug.as_deref(),
    )?;

    let category = CategoryRepo::update(
        &state.pool,
        id,
        &UpdateCategory {
            name: input.name,
            slug,
            description: input.description,
            image_url: input.image_url,
            parent_id: input.parent_id,
            sort_order: input.sort_order,
            is_active: input.is_active,
        },
    )
    .await?
    .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse::new(category)))
}

/// DELETE /api/v1/categories/{id}
pub async fn delete_category(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if CategoryRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
