//! Blog post model and DTOs.

use furnicraft_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::tag::TagInfo;

/// A row from the `blog_posts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BlogPost {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub featured_image: Option<String>,
    pub author_id: Option<DbId>,
    /// Estimated minutes to read.
    pub read_time: i32,
    pub status: String,
    pub published_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A blog post with its tags.
#[derive(Debug, Clone, Serialize)]
pub struct BlogPostDetail {
    #[serde(flatten)]
    pub post: BlogPost,
    pub tags: Vec<TagInfo>,
}

/// DTO for creating a post. Derived fields (`slug`, `read_time`,
/// `published_at`) are already computed by the caller.
#[derive(Debug, Clone)]
pub struct CreateBlogPost {
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub featured_image: Option<String>,
    pub author_id: Option<DbId>,
    pub read_time: i32,
    pub status: String,
    pub published_at: Option<Timestamp>,
}

/// DTO for updating a post. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateBlogPost {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub featured_image: Option<String>,
    pub read_time: Option<i32>,
    pub status: Option<String>,
    pub published_at: Option<Timestamp>,
}

/// Query parameters for `GET /api/v1/blog`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlogListParams {
    /// Ignored (forced to `published`) for anonymous and customer callers.
    pub status: Option<String>,
    pub tag_id: Option<DbId>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
