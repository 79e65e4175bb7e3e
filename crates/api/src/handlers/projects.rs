//! Handlers for the `/projects` portfolio resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use furnicraft_core::error::CoreError;
use furnicraft_core::roles::is_staff;
use furnicraft_core::types::DbId;
use furnicraft_db::models::project::{
    CreateProject, Project, ProjectDetail, ProjectListParams, UpdateProject,
};
use furnicraft_db::models::tag::TaggedEntity;
use furnicraft_db::repositories::{ProjectRepo, TagRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::tags::ensure_tags_exist;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    #[serde(flatten)]
    pub project: CreateProject,
    pub tag_ids: Option<Vec<DbId>>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProjectRequest {
    #[serde(flatten)]
    pub project: UpdateProject,
    pub tag_ids: Option<Vec<DbId>>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Project",
        id,
    })
}

fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() || title.chars().count() > 200 {
        return Err(CoreError::Validation(
            "Project title must be 1-200 characters".into(),
        ));
    }
    Ok(())
}

/// GET /api/v1/projects
pub async fn list_projects(
    State(state): State<AppState>,
    Query(params): Query<ProjectListParams>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = ProjectRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse::new(projects)))
}

/// GET /api/v1/projects/{id}
///
/// Soft-deleted projects are hidden from everyone but staff.
pub async fn get_project(
    State(state): State<AppState>,
    caller: Option<AuthUser>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProjectDetail>>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|p| p.is_active || caller.is_some_and(|u| is_staff(&u.role)))
        .ok_or_else(|| not_found(id))?;
    let tags = TagRepo::for_entity(&state.pool, TaggedEntity::Project, id).await?;
    Ok(Json(DataResponse::new(ProjectDetail { project, tags })))
}

/// POST /api/v1/projects
pub async fn create_project(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Json(input): Json<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    validate_title(&input.project.title)?;
    if let Some(tag_ids) = &input.tag_ids {
        ensure_tags_exist(&state.pool, tag_ids).await?;
    }

    let project = ProjectRepo::create(&state.pool, &input.project).await?;
    if let Some(tag_ids) = &input.tag_ids {
        TagRepo::replace_for_entity(&state.pool, TaggedEntity::Project, project.id, tag_ids)
            .await?;
    }
    Ok((StatusCode::CREATED, Json(DataResponse::new(project))))
}

/// PUT /api/v1/projects/{id}
pub async fn update_project(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProjectRequest>,
) -> AppResult<Json<DataResponse<Project>>> {
    if let Some(title) = &input.project.title {
        validate_title(title)?;
    }
    if let Some(tag_ids) = &input.tag_ids {
        ensure_tags_exist(&state.pool, tag_ids).await?;
    }

    let project = ProjectRepo::update(&state.pool, id, &input.project)
        .await?
        .ok_or_else(|| not_found(id))?;
    if let Some(tag_ids) = &input.tag_ids {
        TagRepo::replace_for_entity(&state.pool, TaggedEntity::Project, id, tag_ids).await?;
    }
    Ok(Json(DataResponse::new(project)))
}

/// DELETE /api/v1/projects/{id}
pub async fn delete_project(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ProjectRepo::soft_delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
