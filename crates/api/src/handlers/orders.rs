//! Handlers for the `/orders` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use furnicraft_core::error::CoreError;
use furnicraft_core::lifecycle::stamp_once;
use furnicraft_core::order::{
    validate_order_status, validate_payment_status, ORDER_STATUS_DELIVERED,
};
use furnicraft_core::roles::is_staff;
use furnicraft_core::types::DbId;
use furnicraft_db::models::order::{
    NewOrder, Order, OrderDetail, OrderListParams, OrderTracking, UpdateOrderStatus,
};
use furnicraft_db::repositories::OrderRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /orders/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: Option<String>,
    pub payment_status: Option<String>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Order", id })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/orders
///
/// Guest checkout is allowed. Prices come from the catalog, never from the
/// request body.
pub async fn place_order(
    State(state): State<AppState>,
    caller: Option<AuthUser>,
    Json(mut input): Json<NewOrder>,
) -> AppResult<(StatusCode, Json<DataResponse<OrderDetail>>)> {
    input.validate()?;
    input.user_id = caller.map(|u| u.user_id);

    let detail = OrderRepo::place(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(detail))))
}

/// GET /api/v1/orders
pub async fn list_orders(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Query(params): Query<OrderListParams>,
) -> AppResult<Json<DataResponse<Vec<Order>>>> {
    if let Some(status) = &params.status {
        validate_order_status(status)?;
    }
    if let Some(payment_status) = &params.payment_status {
        validate_payment_status(payment_status)?;
    }
    let orders = OrderRepo::list(&state.pool, None, &params).await?;
    Ok(Json(DataResponse::new(orders)))
}

/// GET /api/v1/orders/mine
pub async fn list_my_orders(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<OrderListParams>,
) -> AppResult<Json<DataResponse<Vec<Order>>>> {
    let orders = OrderRepo::list(&state.pool, Some(auth.user_id), &params).await?;
    Ok(Json(DataResponse::new(orders)))
}

/// GET /api/v1/orders/{id}
///
/// Staff see every order; customers only their own. Someone else's order is
/// reported as missing.
pub async fn get_order(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<OrderDetail>>> {
    let detail = OrderRepo::find_detail(&state.pool, id)
        .await?
        .filter(|d| is_staff(&auth.role) || d.order.user_id == Some(auth.user_id))
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse::new(detail)))
}

/// GET /api/v1/orders/track/{order_number}
///
/// Public; returns the reduced [`OrderTracking`] view.
pub async fn track_order(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
) -> AppResult<Json<DataResponse<OrderTracking>>> {
    let missing = || AppError::NotFound(format!("Order '{order_number}' not found"));

    let order = OrderRepo::find_by_number(&state.pool, &order_number)
        .await?
        .ok_or_else(missing)?;
    let detail = OrderRepo::find_detail(&state.pool, order.id)
        .await?
        .ok_or_else(missing)?;
    Ok(Json(DataResponse::new(OrderTracking::from(detail))))
}

/// PUT /api/v1/orders/{id}/status
///
/// Any status may follow any other. The first transition to `delivered`
/// stamps `delivered_at`; later transitions never clear or move it.
pub async fn update_order_status(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<DataResponse<Order>>> {
    if let Some(status) = &input.status {
        validate_order_status(status)?;
    }
    if let Some(payment_status) = &input.payment_status {
        validate_payment_status(payment_status)?;
    }

    let current = OrderRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let delivered_at = stamp_once(
        current.delivered_at,
        input.status.as_deref().unwrap_or(&current.status),
        ORDER_STATUS_DELIVERED,
        Utc::now(),
    );

    let order = OrderRepo::update_status(
        &state.pool,
        id,
        &UpdateOrderStatus {
            status: input.status,
            payment_status: input.payment_status,
            delivered_at,
        },
    )
    .await?
    .ok_or_else(|| not_found(id))?;

    tracing::info!(
        order_id = %id,
        status = %order.status,
        payment_status = %order.payment_status,
        user_id = %user.user_id,
        "Order status updated",
    );
    Ok(Json(DataResponse::new(order)))
}
