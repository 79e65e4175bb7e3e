//! Repository for the `projects` table.

use furnicraft_core::search::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use furnicraft_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project, ProjectListParams, UpdateProject};

const COLUMNS: &str = "id, title, description, client_name, location, images, completed_on, \
                        featured, is_active, created_at, updated_at";

/// Provides CRUD operations for portfolio projects.
pub struct ProjectRepo;

impl ProjectRepo {
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                (title, description, client_name, location, images, completed_on, featured)
             VALUES ($1, $2, $3, $4, COALESCE($5, '{{}}'::text[]), $6, COALESCE($7, false))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.client_name)
            .bind(&input.location)
            .bind(&input.images)
            .bind(input.completed_on)
            .bind(input.featured)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List active projects, most recently completed first.
    pub async fn list(
        pool: &PgPool,
        params: &ProjectListParams,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE is_active AND ($1::bool IS NULL OR featured = $1)
             ORDER BY completed_on DESC NULLS LAST, created_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(params.featured)
            .bind(clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                client_name = COALESCE($4, client_name),
                location = COALESCE($5, location),
                images = COALESCE($6, images),
                completed_on = COALESCE($7, completed_on),
                featured = COALESCE($8, featured),
                is_active = COALESCE($9, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.client_name)
            .bind(&input.location)
            .bind(&input.images)
            .bind(input.completed_on)
            .bind(input.featured)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Hide a project from the public portfolio.
    ///
    /// Returns `true` if an active project was deactivated.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE projects SET is_active = false WHERE id = $1 AND is_active")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
