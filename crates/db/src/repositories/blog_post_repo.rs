//! Repository for the `blog_posts` table.
//!
//! Slug, read time and `published_at` arrive already derived; see
//! `furnicraft_core::{slug, blog, lifecycle}`.

use furnicraft_core::blog::BLOG_STATUS_PUBLISHED;
use furnicraft_core::search::{
    clamp_limit, clamp_offset, ilike_pattern, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT,
};
use furnicraft_core::types::DbId;
use sqlx::PgPool;

use crate::models::blog_post::{BlogListParams, BlogPost, CreateBlogPost, UpdateBlogPost};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, slug, excerpt, content, featured_image, author_id, \
                        read_time, status, published_at, created_at, updated_at";

/// Provides CRUD operations for blog posts.
pub struct BlogPostRepo;

impl BlogPostRepo {
    /// Insert a new post, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateBlogPost) -> Result<BlogPost, sqlx::Error> {
        let query = format!(
            "INSERT INTO blog_posts
                (title, slug, excerpt, content, featured_image, author_id,
                 read_time, status, published_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.excerpt)
            .bind(&input.content)
            .bind(&input.featured_image)
            .bind(input.author_id)
            .bind(input.read_time)
            .bind(&input.status)
            .bind(input.published_at)
            .fetch_one(pool)
            .await
    }

    /// Find a post by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blog_posts WHERE id = $1");
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a post by slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blog_posts WHERE slug = $1");
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List posts, newest publication first. `status` defaults to `published`.
    pub async fn list(
        pool: &PgPool,
        params: &BlogListParams,
    ) -> Result<Vec<BlogPost>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM blog_posts b
             WHERE b.status = $1
               AND ($2::uuid IS NULL OR EXISTS (
                    SELECT 1 FROM blog_post_tags bt
                    WHERE bt.blog_post_id = b.id AND bt.tag_id = $2))
               AND ($3::text IS NULL OR b.title ILIKE $3 OR b.content ILIKE $3)
             ORDER BY b.published_at DESC NULLS LAST, b.created_at DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(params.status.as_deref().unwrap_or(BLOG_STATUS_PUBLISHED))
            .bind(params.tag_id)
            .bind(ilike_pattern(params.search.as_deref()))
            .bind(clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    /// Update a post. Only non-`None` fields in `input` are applied.
    ///
    /// `published_at` is only written while the column is still `NULL`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBlogPost,
    ) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!(
            "UPDATE blog_posts SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                excerpt = COALESCE($4, excerpt),
                content = COALESCE($5, content),
                featured_image = COALESCE($6, featured_image),
                read_time = COALESCE($7, read_time),
                status = COALESCE($8, status),
                published_at = COALESCE(published_at, $9)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.excerpt)
            .bind(&input.content)
            .bind(&input.featured_image)
            .bind(input.read_time)
            .bind(&input.status)
            .bind(input.published_at)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a post. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
