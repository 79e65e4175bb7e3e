//! Tag model and DTOs.
//!
//! Tags attach to products, projects and blog posts through the
//! `product_tags`, `project_tags` and `blog_post_tags` junction tables.

use furnicraft_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `tags` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tag {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub color: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Lightweight tag info returned alongside tagged entities.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TagInfo {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub color: Option<String>,
}

/// DTO for creating a tag. `slug` is already derived by the caller.
#[derive(Debug, Clone)]
pub struct CreateTag {
    pub name: String,
    pub slug: String,
    pub color: Option<String>,
}

/// DTO for updating a tag. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateTag {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub color: Option<String>,
    pub status: Option<String>,
}

/// Query parameters for `GET /api/v1/tags`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagListParams {
    /// Include archived tags (staff only).
    #[serde(default)]
    pub include_archived: bool,
}

/// Entities that can carry tags, each backed by its own junction table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaggedEntity {
    Product,
    Project,
    BlogPost,
}

impl TaggedEntity {
    /// Junction table name.
    pub fn table(self) -> &'static str {
        match self {
            Self::Product => "product_tags",
            Self::Project => "project_tags",
            Self::BlogPost => "blog_post_tags",
        }
    }

    /// Foreign-key column pointing at the tagged entity.
    pub fn column(self) -> &'static str {
        match self {
            Self::Product => "product_id",
            Self::Project => "project_id",
            Self::BlogPost => "blog_post_id",
        }
    }
}
