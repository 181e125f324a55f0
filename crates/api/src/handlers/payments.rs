//! Handlers for the `/payments` resource.
//!
//! `cod`/`upi`/`net_banking` settle out-of-band: the payment row is simply
//! (re)written with the chosen method. `card` goes through the external
//! payment-intent lifecycle: initiate creates an intent, the storefront
//! confirms it client-side, then verify retrieves the intent and applies
//! the outcome.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use vastra_core::error::CoreError;
use vastra_core::orders::OrderStatus;
use vastra_core::payments::{self, PaymentMethod};
use vastra_core::types::DbId;
use vastra_db::models::order::Order;
use vastra_db::models::payment::{InitiatePayment, Payment, VerifyPayment};
use vastra_db::repositories::{OrderRepo, PaymentRepo};
use vastra_stripe::{StripeClient, INTENT_SUCCEEDED};

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Response for an initiated payment. `client_secret` is only present for
/// card payments, where the storefront needs it to confirm the intent.
#[derive(Debug, Serialize)]
pub struct InitiatedPayment {
    #[serde(flatten)]
    pub payment: Payment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
}

/// POST /api/v1/payments/initiate
pub async fn initiate(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<InitiatePayment>,
) -> AppResult<Json<DataResponse<InitiatedPayment>>> {
    let order = owned_order(&state, input.order_id, user.user_id).await?;

    match order.status {
        OrderStatus::Paid => {
            return Err(AppError::Core(CoreError::InvalidState(
                "Order is already paid".into(),
            )))
        }
        OrderStatus::Cancelled => {
            return Err(AppError::Core(CoreError::InvalidState(
                "Cannot pay for cancelled order".into(),
            )))
        }
        _ => {}
    }

    let initiated = match input.payment_method {
        PaymentMethod::Card => {
            let stripe = require_stripe(&state)?;

            let intent = stripe
                .create_payment_intent(
                    payments::amount_minor_units(order.total_amount),
                    "usd",
                    order.id,
                    user.user_id,
                )
                .await?;

            let payment = PaymentRepo::upsert_method(
                &state.pool,
                order.id,
                PaymentMethod::Card,
                Some(&intent.id),
            )
            .await?;

            InitiatedPayment {
                payment,
                client_secret: intent.client_secret,
            }
        }
        method => {
            let payment = PaymentRepo::upsert_method(&state.pool, order.id, method, None).await?;
            InitiatedPayment {
                payment,
                client_secret: None,
            }
        }
    };

    tracing::info!(
        order_id = order.id,
        method = %initiated.payment.method,
        "Payment initiated"
    );

    Ok(Json(DataResponse { data: initiated }))
}

/// POST /api/v1/payments/verify
///
/// Retrieves the payment intent from the provider and applies the outcome.
/// Idempotent: re-verifying an already-completed payment applies nothing
/// and returns the settled row.
pub async fn verify(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<VerifyPayment>,
) -> AppResult<Json<DataResponse<Payment>>> {
    let order = owned_order(&state, input.order_id, user.user_id).await?;
    let stripe = require_stripe(&state)?;

    let intent = stripe
        .retrieve_payment_intent(&input.payment_intent_id)
        .await?;

    if intent.status != INTENT_SUCCEEDED {
        PaymentRepo::mark_failed(&state.pool, order.id, &input.payment_intent_id).await?;
        return Err(AppError::Core(CoreError::VerificationFailed {
            provider_status: intent.status,
        }));
    }

    let applied =
        PaymentRepo::mark_paid(&state.pool, order.id, &input.payment_intent_id).await?;
    if applied {
        tracing::info!(order_id = order.id, "Payment verified");
    } else {
        tracing::debug!(order_id = order.id, "Payment already settled, verify is a no-op");
    }

    let payment = PaymentRepo::find_by_order(&state.pool, order.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Payment",
            id: order.id,
        }))?;

    Ok(Json(DataResponse { data: payment }))
}

/// GET /api/v1/payments/{order_id}
pub async fn status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(order_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Payment>>> {
    let order = owned_order(&state, order_id, user.user_id).await?;

    let payment = PaymentRepo::find_by_order(&state.pool, order.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Payment",
            id: order_id,
        }))?;

    Ok(Json(DataResponse { data: payment }))
}

/// Load an order scoped to its owner.
async fn owned_order(state: &AppState, order_id: DbId, user_id: DbId) -> AppResult<Order> {
    OrderRepo::find_by_id_for_user(&state.pool, order_id, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Order",
            id: order_id,
        }))
}

/// The configured Stripe client, or [`CoreError::PaymentNotConfigured`].
fn require_stripe(state: &AppState) -> Result<&StripeClient, AppError> {
    state
        .stripe
        .as_deref()
        .ok_or(AppError::Core(CoreError::PaymentNotConfigured))
}
