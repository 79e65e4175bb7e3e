//! Repository for the `products` table.

use furnicraft_core::catalog::{PRODUCT_STATUS_ACTIVE, PRODUCT_STATUS_ARCHIVED};
use furnicraft_core::rating::aggregate_ratings;
use furnicraft_core::search::{
    clamp_limit, clamp_offset, ilike_pattern, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT,
};
use furnicraft_core::types::DbId;
use sqlx::PgPool;

use crate::models::product::{
    CreateProduct, Product, ProductListParams, ProductSummary, UpdateProduct,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, short_description, price, stock_quantity, \
                        in_stock, rating, review_count, category_id, material, dimensions, \
                        images, featured, status, created_at, updated_at";

/// Provides CRUD operations and rating maintenance for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product, returning the created row.
    ///
    /// `rating` and `review_count` always start at zero.
    pub async fn create(pool: &PgPool, input: &CreateProduct) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products
                (name, description, short_description, price, stock_quantity, in_stock,
                 category_id, material, dimensions, images, featured, status)
             VALUES ($1, COALESCE($2, ''), $3, $4, COALESCE($5, 0), COALESCE($6, true),
                     $7, $8, $9, COALESCE($10, '{{}}'::text[]), COALESCE($11, false),
                     COALESCE($12, '{PRODUCT_STATUS_ACTIVE}'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.short_description)
            .bind(input.price)
            .bind(input.stock_quantity)
            .bind(input.in_stock)
            .bind(input.category_id)
            .bind(&input.material)
            .bind(&input.dimensions)
            .bind(&input.images)
            .bind(input.featured)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    /// Find a product by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List products matching `params`, featured first, newest first.
    ///
    /// `status` defaults to `active`.
    pub async fn list(
        pool: &PgPool,
        params: &ProductListParams,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products p
             WHERE p.status = $1
               AND ($2::uuid IS NULL OR p.category_id = $2)
               AND ($3::text IS NULL OR p.name ILIKE $3 OR p.description ILIKE $3)
               AND ($4::numeric IS NULL OR p.price >= $4)
               AND ($5::numeric IS NULL OR p.price <= $5)
               AND ($6::bool IS NULL OR p.in_stock = $6)
               AND ($7::bool IS NULL OR p.featured = $7)
               AND ($8::uuid IS NULL OR EXISTS (
                    SELECT 1 FROM product_tags pt
                    WHERE pt.product_id = p.id AND pt.tag_id = $8))
             ORDER BY p.featured DESC, p.created_at DESC
             LIMIT $9 OFFSET $10"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(params.status.as_deref().unwrap_or(PRODUCT_STATUS_ACTIVE))
            .bind(params.category_id)
            .bind(ilike_pattern(params.search.as_deref()))
            .bind(params.min_price)
            .bind(params.max_price)
            .bind(params.in_stock)
            .bind(params.featured)
            .bind(params.tag_id)
            .bind(clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    /// Summaries for a batch of products, for embedding in order items.
    pub async fn summaries(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<ProductSummary>, sqlx::Error> {
        sqlx::query_as::<_, ProductSummary>(
            "SELECT id, name, price, images FROM products WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(pool)
        .await
    }

    /// Update a product. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                short_description = COALESCE($4, short_description),
                price = COALESCE($5, price),
                stock_quantity = COALESCE($6, stock_quantity),
                in_stock = COALESCE($7, in_stock),
                category_id = COALESCE($8, category_id),
                material = COALESCE($9, material),
                dimensions = COALESCE($10, dimensions),
                images = COALESCE($11, images),
                featured = COALESCE($12, featured),
                status = COALESCE($13, status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.short_description)
            .bind(input.price)
            .bind(input.stock_quantity)
            .bind(input.in_stock)
            .bind(input.category_id)
            .bind(&input.material)
            .bind(&input.dimensions)
            .bind(&input.images)
            .bind(input.featured)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Archive a product. Order history keeps referencing it.
    ///
    /// Returns `true` if the product existed and was not already archived.
    pub async fn archive(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE products SET status = $2 WHERE id = $1 AND status <> $2")
                .bind(id)
                .bind(PRODUCT_STATUS_ARCHIVED)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Recompute the cached `rating` / `review_count` from approved reviews.
    ///
    /// Runs under a row lock on the product so concurrent moderation calls
    /// serialize. When no approved review remains, a non-zero cached count is
    /// reset to `0 / 0`; a product that never had one is left untouched.
    /// Returns the product after the refresh, or `None` if it does not exist.
    pub async fn refresh_rating(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM products WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            return Ok(None);
        }

        let reviews: Vec<(String, i16)> =
            sqlx::query_as("SELECT status, rating FROM reviews WHERE product_id = $1")
                .bind(id)
                .fetch_all(&mut *tx)
                .await?;

        let aggregate = aggregate_ratings(reviews.iter().map(|(s, r)| (s.as_str(), *r)));

        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        let product = match aggregate {
            Some(agg) => {
                let update = format!(
                    "UPDATE products SET rating = $2, review_count = $3
                     WHERE id = $1
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, Product>(&update)
                    .bind(id)
                    .bind(agg.rating)
                    .bind(agg.review_count)
                    .fetch_one(&mut *tx)
                    .await?
            }
            None => {
                // The last approved review went away: clear the stale cache.
                let reset = format!(
                    "UPDATE products SET rating = 0, review_count = 0
                     WHERE id = $1 AND review_count > 0
                     RETURNING {COLUMNS}"
                );
                let cleared = sqlx::query_as::<_, Product>(&reset)
                    .bind(id)
                    .fetch_optional(&mut *tx)
                    .await?;
                match cleared {
                    Some(product) => product,
                    None => {
                        sqlx::query_as::<_, Product>(&query)
                            .bind(id)
                            .fetch_one(&mut *tx)
                            .await?
                    }
                }
            }
        };

        tx.commit().await?;

        tracing::debug!(
            product_id = %id,
            rating = %product.rating,
            review_count = product.review_count,
            "Product rating refreshed",
        );
        Ok(Some(product))
    }
}
