//! Handlers for contact-form submissions.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use furnicraft_core::contact::{validate_contact_status, CONTACT_STATUS_RESOLVED};
use furnicraft_core::error::CoreError;
use furnicraft_core::lifecycle::stamp_once;
use furnicraft_core::types::DbId;
use furnicraft_db::models::contact::{Contact, ContactListParams, CreateContact, UpdateContact};
use furnicraft_db::repositories::ContactRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    #[validate(length(max = 200))]
    pub subject: Option<String>,
    #[validate(length(min = 1, max = 5000, message = "Message is required"))]
    pub message: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateContactRequest {
    pub status: Option<String>,
    #[validate(length(max = 5000))]
    pub notes: Option<String>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Contact",
        id,
    })
}

/// POST /api/v1/contacts
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(input): Json<ContactRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Contact>>)> {
    input.validate()?;

    let contact = ContactRepo::create(
        &state.pool,
        &CreateContact {
            name: input.name,
            email: input.email,
            phone: input.phone,
            subject: input.subject,
            message: input.message,
        },
    )
    .await?;

    tracing::info!(contact_id = %contact.id, "Contact form submitted");
    Ok((StatusCode::CREATED, Json(DataResponse::new(contact))))
}

/// GET /api/v1/contacts
pub async fn list_contacts(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Query(params): Query<ContactListParams>,
) -> AppResult<Json<DataResponse<Vec<Contact>>>> {
    if let Some(status) = &params.status {
        validate_contact_status(status)?;
    }
    let contacts = ContactRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse::new(contacts)))
}

/// PUT /api/v1/contacts/{id}
pub async fn update_contact(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateContactRequest>,
) -> AppResult<Json<DataResponse<Contact>>> {
    input.validate()?;
    if let Some(status) = &input.status {
        validate_contact_status(status)?;
    }

    let current = ContactRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let resolved_at = stamp_once(
        current.resolved_at,
        input.status.as_deref().unwrap_or(&current.status),
        CONTACT_STATUS_RESOLVED,
        Utc::now(),
    );

    let contact = ContactRepo::update(
        &state.pool,
        id,
        &UpdateContact {
            status: input.status,
            notes: input.notes,
            resolved_at,
        },
    )
    .await?
    .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse::new(contact)))
}

/// DELETE /api/v1/contacts/{id}
pub async fn delete_contact(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ContactRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
