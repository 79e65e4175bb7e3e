//! Handlers for the `/blog` resource.
//!
//! Slug, read time and `published_at` are derived here before the row is
//! written; the repository only persists what it is given.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use furnicraft_core::blog::{
    read_time_on_create, read_time_on_update, validate_blog_status, BLOG_STATUS_DRAFT,
    BLOG_STATUS_PUBLISHED,
};
use furnicraft_core::error::CoreError;
use furnicraft_core::lifecycle::stamp_once;
use furnicraft_core::roles::is_staff;
use furnicraft_core::slug::{slug_on_create, slug_on_update};
use furnicraft_core::types::DbId;
use furnicraft_db::models::blog_post::{
    BlogListParams, BlogPost, BlogPostDetail, CreateBlogPost, UpdateBlogPost,
};
use furnicraft_db::models::tag::TaggedEntity;
use furnicraft_db::repositories::{BlogPostRepo, TagRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::tags::ensure_tags_exist;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /blog`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBlogPostRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub slug: Option<String>,
    #[validate(length(max = 500))]
    pub excerpt: Option<String>,
    #[validate(length(min = 1))]
    pub content: String,
    pub featured_image: Option<String>,
    #[validate(range(min = 0))]
    pub read_time: Option<i32>,
    pub status: Option<String>,
    pub tag_ids: Option<Vec<DbId>>,
}

/// Request body for `PUT /blog/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBlogPostRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub slug: Option<String>,
    #[validate(length(max = 500))]
    pub excerpt: Option<String>,
    #[validate(length(min = 1))]
    pub content: Option<String>,
    pub featured_image: Option<String>,
    #[validate(range(min = 0))]
    pub read_time: Option<i32>,
    pub status: Option<String>,
    pub tag_ids: Option<Vec<DbId>>,
}

fn caller_is_staff(caller: &Option<AuthUser>) -> bool {
    caller.as_ref().is_some_and(|u| is_staff(&u.role))
}

/// GET /api/v1/blog
///
/// Anonymous and customer callers only ever see published posts.
pub async fn list_posts(
    State(state): State<AppState>,
    caller: Option<AuthUser>,
    Query(mut params): Query<BlogListParams>,
) -> AppResult<Json<DataResponse<Vec<BlogPost>>>> {
    if !caller_is_staff(&caller) {
        params.status = Some(BLOG_STATUS_PUBLISHED.to_string());
    }
    let posts = BlogPostRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse::new(posts)))
}

/// GET /api/v1/blog/slug/{slug}
pub async fn get_post_by_slug(
    State(state): State<AppState>,
    caller: Option<AuthUser>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<BlogPostDetail>>> {
    let post = BlogPostRepo::find_by_slug(&state.pool, &slug)
        .await?
        .filter(|p| p.status == BLOG_STATUS_PUBLISHED || caller_is_staff(&caller))
        .ok_or_else(|| AppError::NotFound(format!("Blog post with slug '{slug}' not found")))?;
    let tags = TagRepo::for_entity(&state.pool, TaggedEntity::BlogPost, post.id).await?;
    Ok(Json(DataResponse::new(BlogPostDetail { post, tags })))
}

/// POST /api/v1/blog
pub async fn create_post(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Json(input): Json<CreateBlogPostRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<BlogPost>>)> {
    input.validate()?;
    let status = input
        .status
        .unwrap_or_else(|| BLOG_STATUS_DRAFT.to_string());
    validate_blog_status(&status)?;
    if let Some(tag_ids) = &input.tag_ids {
        ensure_tags_exist(&state.pool, tag_ids).await?;
    }

    let slug = slug_on_create(&input.title, input.slug.as_deref())?;
    let read_time = read_time_on_create(&input.content, input.read_time);
    let published_at = stamp_once(None, &status, BLOG_STATUS_PUBLISHED, Utc::now());

    let post = BlogPostRepo::create(
        &state.pool,
        &CreateBlogPost {
            title: input.title,
            slug,
            excerpt: input.excerpt,
            content: input.content,
            featured_image: input.featured_image,
            author_id: Some(user.user_id),
            read_time,
            status,
            published_at,
        },
    )
    .await?;

    if let Some(tag_ids) = &input.tag_ids {
        TagRepo::replace_for_entity(&state.pool, TaggedEntity::BlogPost, post.id, tag_ids)
            .await?;
    }

    tracing::info!(post_id = %post.id, slug = %post.slug, "Blog post created");
    Ok((StatusCode::CREATED, Json(DataResponse::new(post))))
}

/// PUT /api/v1/blog/{id}
pub async fn update_post(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBlogPostRequest>,
) -> AppResult<Json<DataResponse<BlogPost>>> {
    input.validate()?;
    if let Some(status) = &input.status {
        validate_blog_status(status)?;
    }
    if let Some(tag_ids) = &input.tag_ids {
        ensure_tags_exist(&state.pool, tag_ids).await?;
    }

    let not_found = || AppError::Core(CoreError::NotFound {
        entity: "BlogPost",
        id,
    });
    let current = BlogPostRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;

    let slug = slug_on_update(
        &current.title,
        &current.slug,
        input.title.as_deref(),
        input.slug.as_deref(),
    )?;
    let read_time = input
        .read_time
        .or_else(|| read_time_on_update(&current.content, input.content.as_deref()));
    let effective_status = input.status.as_deref().unwrap_or(&current.status);
    let published_at = stamp_once(
        current.published_at,
        effective_status,
        BLOG_STATUS_PUBLISHED,
        Utc::now(),
    );

    let post = BlogPostRepo::update(
        &state.pool,
        id,
        &UpdateBlogPost {
            title: input.title,
            slug,
            excerpt: input.excerpt,
            content: input.content,
            featured_image: input.featured_image,
            read_time,
            status: input.status,
            published_at,
        },
    )
    .await?
    .ok_or_else(not_found)?;

    if let Some(tag_ids) = &input.tag_ids {
        TagRepo::replace_for_entity(&state.pool, TaggedEntity::BlogPost, id, tag_ids).await?;
    }
    Ok(Json(DataResponse::new(post)))
}

/// DELETE /api/v1/blog/{id}
pub async fn delete_post(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if BlogPostRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "BlogPost",
            id,
        }))
    }
}
