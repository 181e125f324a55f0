//! Handlers for the `/orders` resource.
//!
//! Creation and the status-changing operations delegate to
//! [`vastra_db::checkout`], which owns the transactional semantics.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use vastra_core::error::CoreError;
use vastra_core::orders::OrderStatus;
use vastra_core::payments::PaymentMethod;
use vastra_core::pricing;
use vastra_core::types::{DbId, Timestamp};
use vastra_db::checkout;
use vastra_db::models::order::{
    CreateOrder, Order, OrderItemDetail, OrderSummary, UpdateOrderStatus,
};
use vastra_db::repositories::{OrderItemRepo, OrderRepo};

use crate::auth::{self, AuthUser};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Response for a freshly created order.
#[derive(Debug, Serialize)]
pub struct CreatedOrder {
    pub id: DbId,
    pub total_amount: f64,
    pub status: OrderStatus,
    pub payment_id: Option<DbId>,
    pub payment_method: PaymentMethod,
    pub created_at: Timestamp,
}

/// An order summary with its item snapshots.
#[derive(Debug, Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: OrderSummary,
    pub items: Vec<OrderItemDetail>,
}

/// GET /api/v1/orders
pub async fn list_orders(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<OrderSummary>>>> {
    let orders = OrderRepo::list_with_details(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: orders }))
}

/// GET /api/v1/orders/{id}
pub async fn get_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<OrderDetail>>> {
    let order = OrderRepo::summary_for_user(&state.pool, id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Order",
            id,
        }))?;

    let items = OrderItemRepo::list_detailed(&state.pool, id).await?;

    Ok(Json(DataResponse {
        data: OrderDetail { order, items },
    }))
}

/// POST /api/v1/orders
///
/// Creates an order from the caller's cart: snapshot, stock reservation,
/// payment row, and cart clear happen atomically.
pub async fn create_order(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateOrder>,
) -> AppResult<(StatusCode, Json<DataResponse<CreatedOrder>>)> {
    let order = checkout::create_order(&state.pool, user.user_id, &input).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CreatedOrder {
                id: order.id,
                total_amount: pricing::round_money(order.total_amount),
                status: order.status,
                payment_id: order.payment_id,
                payment_method: input.payment_method,
                created_at: order.created_at,
            },
        }),
    ))
}

/// PUT /api/v1/orders/{id}/cancel
///
/// Cancels the caller's order, restoring reserved stock and failing any
/// associated payment.
pub async fn cancel_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Order>>> {
    let order = checkout::cancel_order(&state.pool, id, user.user_id).await?;
    Ok(Json(DataResponse { data: order }))
}

/// PUT /api/v1/orders/{id}/status (admin)
///
/// Transitions an order along the legal status graph.
pub async fn update_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateOrderStatus>,
) -> AppResult<Json<DataResponse<Order>>> {
    auth::require_admin(&user)?;

    let order = checkout::update_status(&state.pool, id, input.status).await?;
    Ok(Json(DataResponse { data: order }))
}
