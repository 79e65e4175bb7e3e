//! Contact form submission model and DTOs.

use furnicraft_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `contacts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Contact {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub status: String,
    pub notes: Option<String>,
    pub resolved_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for a new submission. Status starts as `new`.
#[derive(Debug, Clone)]
pub struct CreateContact {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
}

/// DTO for the staff update. `resolved_at` is already stamped by the caller.
#[derive(Debug, Clone, Default)]
pub struct UpdateContact {
    pub status: Option<String>,
    pub notes: Option<String>,
    pub resolved_at: Option<Timestamp>,
}

/// Query parameters for `GET /api/v1/contacts`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactListParams {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
