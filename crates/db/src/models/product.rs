//! Product entity model and DTOs.

use furnicraft_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::category::CategorySummary;
use crate::models::review::Review;
use crate::models::tag::TagInfo;

/// A row from the `products` table.
///
/// `rating` and `review_count` are a cache over approved reviews, refreshed by
/// [`ProductRepo::refresh_rating`](crate::repositories::ProductRepo::refresh_rating).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub short_description: Option<String>,
    pub price: Decimal,
    pub stock_quantity: i32,
    pub in_stock: bool,
    pub rating: Decimal,
    pub review_count: i32,
    pub category_id: Option<DbId>,
    pub material: Option<String>,
    pub dimensions: Option<String>,
    pub images: Vec<String>,
    pub featured: bool,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Product fields embedded in order items.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductSummary {
    pub id: DbId,
    pub name: String,
    pub price: Decimal,
    pub images: Vec<String>,
}

/// Product detail view: the row plus its category, tags and approved reviews.
#[derive(Debug, Clone, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub category: Option<CategorySummary>,
    pub tags: Vec<TagInfo>,
    pub reviews: Vec<Review>,
}

/// DTO for creating a product.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProduct {
    pub name: String,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub price: Decimal,
    pub stock_quantity: Option<i32>,
    pub in_stock: Option<bool>,
    pub category_id: Option<DbId>,
    pub material: Option<String>,
    pub dimensions: Option<String>,
    pub images: Option<Vec<String>>,
    pub featured: Option<bool>,
    pub status: Option<String>,
}

/// DTO for updating a product. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub price: Option<Decimal>,
    pub stock_quantity: Option<i32>,
    pub in_stock: Option<bool>,
    pub category_id: Option<DbId>,
    pub material: Option<String>,
    pub dimensions: Option<String>,
    pub images: Option<Vec<String>>,
    pub featured: Option<bool>,
    pub status: Option<String>,
}

/// Query parameters for `GET /api/v1/products`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductListParams {
    pub category_id: Option<DbId>,
    /// Defaults to `active` for the public catalogue.
    pub status: Option<String>,
    /// Case-insensitive match on name and description.
    pub search: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub in_stock: Option<bool>,
    pub featured: Option<bool>,
    pub tag_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
