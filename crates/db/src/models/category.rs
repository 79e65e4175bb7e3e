//! Category entity model and DTOs.

use furnicraft_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub parent_id: Option<DbId>,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Lightweight category reference embedded in product responses.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CategorySummary {
    pub id: DbId,
    pub name: String,
    pub slug: String,
}

/// A category with its direct children (one level deep).
#[derive(Debug, Clone, Serialize)]
pub struct CategoryTree {
    #[serde(flatten)]
    pub category: Category,
    pub children: Vec<Category>,
}

/// DTO for creating a category. `slug` is already derived by the caller.
#[derive(Debug, Clone)]
pub struct CreateCategory {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub parent_id: Option<DbId>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// DTO for updating a category. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub parent_id: Option<DbId>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// Query parameters for `GET /api/v1/categories`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryListParams {
    #[serde(default)]
    pub include_inactive: bool,
}
