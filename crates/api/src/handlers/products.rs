//! Handlers for the `/products` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use furnicraft_core::catalog::{validate_product_status, PRODUCT_STATUS_ACTIVE};
use furnicraft_core::error::CoreError;
use furnicraft_core::pricing::validate_price;
use furnicraft_core::roles::is_staff;
use furnicraft_core::types::DbId;
use furnicraft_db::models::product::{
    CreateProduct, Product, ProductDetail, ProductListParams, UpdateProduct,
};
use furnicraft_db::models::tag::{TagInfo, TaggedEntity};
use furnicraft_db::repositories::{CategoryRepo, ProductRepo, ReviewRepo, TagRepo};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::tags::ensure_tags_exist;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /products`.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    #[serde(flatten)]
    pub product: CreateProduct,
    pub tag_ids: Option<Vec<DbId>>,
}

/// Request body for `PUT /products/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    #[serde(flatten)]
    pub product: UpdateProduct,
    pub tag_ids: Option<Vec<DbId>>,
}

/// Request body for `PUT /products/{id}/tags`.
#[derive(Debug, Deserialize)]
pub struct ReplaceTagsRequest {
    pub tag_ids: Vec<DbId>,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_fields(
    name: Option<&str>,
    price: Option<Decimal>,
    stock_quantity: Option<i32>,
    status: Option<&str>,
) -> Result<(), CoreError> {
    if let Some(name) = name {
        if name.trim().is_empty() || name.chars().count() > 200 {
            return Err(CoreError::Validation(
                "Product name must be 1-200 characters".into(),
            ));
        }
    }
    if let Some(price) = price {
        validate_price(price)?;
    }
    if stock_quantity.is_some_and(|q| q < 0) {
        return Err(CoreError::Validation(
            "Stock quantity must not be negative".into(),
        ));
    }
    if let Some(status) = status {
        validate_product_status(status)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/products
///
/// Only staff may list non-active products.
pub async fn list_products(
    State(state): State<AppState>,
    caller: Option<AuthUser>,
    Query(mut params): Query<ProductListParams>,
) -> AppResult<Json<DataResponse<Vec<Product>>>> {
    if !caller.is_some_and(|u| is_staff(&u.role)) {
        params.status = None;
    }
    let products = ProductRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse::new(products)))
}

/// GET /api/v1/products/{id}
///
/// Product with its category, tags and approved reviews. Non-active products
/// are only visible to staff.
pub async fn get_product(
    State(state): State<AppState>,
    caller: Option<AuthUser>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProductDetail>>> {
    let not_found = || AppError::Core(CoreError::NotFound {
        entity: "Product",
        id,
    });

    let product = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;
    if product.status != PRODUCT_STATUS_ACTIVE && !caller.is_some_and(|u| is_staff(&u.role)) {
        return Err(not_found());
    }

    let category = match product.category_id {
        Some(category_id) => CategoryRepo::find_summary(&state.pool, category_id).await?,
        None => None,
    };
    let tags = TagRepo::for_entity(&state.pool, TaggedEntity::Product, id).await?;
    let reviews = ReviewRepo::list_approved_for_product(&state.pool, id).await?;

    Ok(Json(DataResponse::new(ProductDetail {
        product,
        category,
        tags,
        reviews,
    })))
}

/// POST /api/v1/products
pub async fn create_product(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Json(input): Json<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Product>>)> {
    let p = &input.product;
    validate_fields(
        Some(p.name.as_str()),
        Some(p.price),
        p.stock_quantity,
        p.status.as_deref(),
    )?;
    if let Some(tag_ids) = &input.tag_ids {
        ensure_tags_exist(&state.pool, tag_ids).await?;
    }

    let product = ProductRepo::create(&state.pool, p).await?;
    if let Some(tag_ids) = &input.tag_ids {
        TagRepo::replace_for_entity(&state.pool, TaggedEntity::Product, product.id, tag_ids)
            .await?;
    }

    tracing::info!(product_id = %product.id, user_id = %user.user_id, "Product created");
    Ok((StatusCode::CREATED, Json(DataResponse::new(product))))
}

/// PUT /api/v1/products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProductRequest>,
) -> AppResult<Json<DataResponse<Product>>> {
    let p = &input.product;
    validate_fields(
        p.name.as_deref(),
        p.price,
        p.stock_quantity,
        p.status.as_deref(),
    )?;
    if let Some(tag_ids) = &input.tag_ids {
        ensure_tags_exist(&state.pool, tag_ids).await?;
    }

    let product = ProductRepo::update(&state.pool, id, p)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;
    if let Some(tag_ids) = &input.tag_ids {
        TagRepo::replace_for_entity(&state.pool, TaggedEntity::Product, id, tag_ids).await?;
    }
    Ok(Json(DataResponse::new(product)))
}

/// DELETE /api/v1/products/{id}
///
/// Archives the product; order history keeps referencing it.
pub async fn archive_product(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ProductRepo::archive(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))
    }
}

/// PUT /api/v1/products/{id}/tags
pub async fn replace_product_tags(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<ReplaceTagsRequest>,
) -> AppResult<Json<DataResponse<Vec<TagInfo>>>> {
    ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;
    ensure_tags_exist(&state.pool, &input.tag_ids).await?;
    TagRepo::replace_for_entity(&state.pool, TaggedEntity::Product, id, &input.tag_ids).await?;
    let tags = TagRepo::for_entity(&state.pool, TaggedEntity::Product, id).await?;
    Ok(Json(DataResponse::new(tags)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_price_rejected() {
        assert!(validate_fields(None, Some(Decimal::new(-1, 2)), None, None).is_err());
        assert!(validate_fields(None, Some(Decimal::ZERO), None, None).is_ok());
    }

    #[test]
    fn price_must_fit_two_decimal_column() {
        assert!(validate_fields(None, Some(Decimal::new(9_999_999_999, 2)), None, None).is_ok());
        assert!(validate_fields(None, Some(Decimal::new(10_000_000_000, 2)), None, None).is_err());
        assert!(validate_fields(None, Some(Decimal::new(1_999, 3)), None, None).is_err());
    }

    #[test]
    fn blank_name_rejected() {
        assert!(validate_fields(Some("   "), None, None, None).is_err());
        assert!(validate_fields(Some("Oak chair"), None, None, None).is_ok());
    }

    #[test]
    fn unknown_status_rejected() {
        assert!(validate_fields(None, None, None, Some("sold")).is_err());
        assert!(validate_fields(None, None, Some(-1), None).is_err());
    }
}
