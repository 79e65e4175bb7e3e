//! Portfolio project model and DTOs.

use chrono::NaiveDate;
use furnicraft_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::tag::TagInfo;

/// A row from the `projects` table. Deleting a project clears `is_active`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub client_name: Option<String>,
    pub location: Option<String>,
    pub images: Vec<String>,
    pub completed_on: Option<NaiveDate>,
    pub featured: bool,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A project with its tags.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub tags: Vec<TagInfo>,
}

/// DTO for creating a project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub description: Option<String>,
    pub client_name: Option<String>,
    pub location: Option<String>,
    pub images: Option<Vec<String>>,
    pub completed_on: Option<NaiveDate>,
    pub featured: Option<bool>,
}

/// DTO for updating a project. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub client_name: Option<String>,
    pub location: Option<String>,
    pub images: Option<Vec<String>>,
    pub completed_on: Option<NaiveDate>,
    pub featured: Option<bool>,
    pub is_active: Option<bool>,
}

/// Query parameters for `GET /api/v1/projects`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectListParams {
    pub featured: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
