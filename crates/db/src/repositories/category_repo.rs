//! Repository for the `categories` table.

use furnicraft_core::types::DbId;
use sqlx::PgPool;

use crate::models::category::{
    Category, CategoryListParams, CategorySummary, CategoryTree, CreateCategory, UpdateCategory,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, slug, description, image_url, parent_id, sort_order, \
                        is_active, created_at, updated_at";

/// Provides CRUD operations for product categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCategory) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (name, slug, description, image_url, parent_id, sort_order, is_active)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 0), COALESCE($7, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(input.parent_id)
            .bind(input.sort_order)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Find a category by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a category by slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE slug = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Summary (id, name, slug) of a category, for embedding in product views.
    pub async fn find_summary(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CategorySummary>, sqlx::Error> {
        sqlx::query_as::<_, CategorySummary>(
            "SELECT id, name, slug FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// List direct children of a category ordered by `sort_order`, then name.
    pub async fn list_children(
        pool: &PgPool,
        parent_id: DbId,
        include_inactive: bool,
    ) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM categories
             WHERE parent_id = $1 AND ($2 OR is_active)
             ORDER BY sort_order, name"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(parent_id)
            .bind(include_inactive)
            .fetch_all(pool)
            .await
    }

    /// List top-level categories, each with its direct children.
    ///
    /// Loads all rows in one query and groups them in memory.
    pub async fn list_tree(
        pool: &PgPool,
        params: &CategoryListParams,
    ) -> Result<Vec<CategoryTree>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM categories
             WHERE ($1 OR is_active)
             ORDER BY sort_order, name"
        );
        let rows = sqlx::query_as::<_, Category>(&query)
            .bind(params.include_inactive)
            .fetch_all(pool)
            .await?;

        let (roots, children): (Vec<Category>, Vec<Category>) =
            rows.into_iter().partition(|c| c.parent_id.is_none());

        Ok(roots
            .into_iter()
            .map(|root| {
                let kids = children
                    .iter()
                    .filter(|c| c.parent_id == Some(root.id))
                    .cloned()
                    .collect();
                CategoryTree {
                    category: root,
                    children: kids,
                }
            })
            .collect())
    }

    /// Update a category. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET
                name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                image_url = COALESCE($5, image_url),
                parent_id = COALESCE($6, parent_id),
                sort_order = COALESCE($7, sort_order),
                is_active = COALESCE($8, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(input.parent_id)
            .bind(input.sort_order)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a category. Products and children keep existing with a
    /// `NULL` reference. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
