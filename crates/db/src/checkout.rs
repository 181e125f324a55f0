//! Checkout orchestration: order creation, cancellation, and status
//! transitions.
//!
//! Each operation runs as a single database transaction. Order creation
//! treats order + items + stock decrements + payment + cart-clear as one
//! atomic unit: a failure at any step after reservation rolls the whole
//! transaction back, which restores the reserved stock before the error
//! surfaces. Cancellation and status updates validate the current status
//! against a row-locked read inside the same transaction that applies the
//! change, so a transition is never partially applied.

use sqlx::PgPool;
use vastra_core::error::CoreError;
use vastra_core::orders::{self, OrderStatus};
use vastra_core::pricing;
use vastra_core::types::DbId;

use crate::models::order::{CreateOrder, Order};
use crate::repositories::{
    AddressRepo, CartRepo, OrderItemRepo, OrderRepo, PaymentRepo, VariantRepo,
};

/// Error type for checkout operations: either a domain rule was violated or
/// the database failed.
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error(transparent)]
    Domain(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Create an order from the user's cart.
///
/// Validates address ownership, snapshots and stock-checks the cart,
/// computes the total, then atomically persists the order, its items with
/// frozen purchase prices, the stock decrements, the pending payment row,
/// and the cart clear.
pub async fn create_order(
    pool: &PgPool,
    user_id: DbId,
    input: &CreateOrder,
) -> Result<Order, CheckoutError> {
    if !AddressRepo::belongs_to_user(pool, input.shipping_address_id, user_id).await? {
        return Err(CoreError::NotFound {
            entity: "Address",
            id: input.shipping_address_id,
        }
        .into());
    }

    let lines = CartRepo::snapshot_lines(pool, user_id).await?;
    if lines.is_empty() {
        return Err(CoreError::EmptyCart.into());
    }

    // Fail the whole snapshot before any write if a single line overdraws.
    for line in &lines {
        if line.quantity > line.stock {
            return Err(CoreError::InsufficientStock {
                variant_id: line.variant_id,
                requested: line.quantity,
                available: line.stock,
            }
            .into());
        }
    }

    let total_amount =
        pricing::validate_total(lines.iter().map(|l| l.line_total()).sum::<f64>())
            .map_err(CheckoutError::Domain)?;

    let mut tx = pool.begin().await?;

    let mut order = OrderRepo::insert(&mut *tx, user_id, total_amount, input.shipping_address_id)
        .await?;

    for line in &lines {
        let unit_price =
            pricing::validate_total(line.unit_price()).map_err(CheckoutError::Domain)?;
        OrderItemRepo::insert(&mut *tx, order.id, line.variant_id, line.quantity, unit_price)
            .await?;

        // Authoritative, race-free reservation: the conditional decrement
        // re-checks stock in the same statement. A concurrent order may
        // have consumed the stock the snapshot saw.
        if !VariantRepo::reserve(&mut *tx, line.variant_id, line.quantity).await? {
            let available = VariantRepo::stock_of(pool, line.variant_id)
                .await?
                .unwrap_or(0);
            return Err(CoreError::InsufficientStock {
                variant_id: line.variant_id,
                requested: line.quantity,
                available,
            }
            .into());
        }
    }

    let payment = PaymentRepo::insert(&mut *tx, order.id, input.payment_method).await?;
    OrderRepo::set_payment(&mut *tx, order.id, payment.id).await?;

    let cleared = CartRepo::clear(&mut *tx, user_id).await?;

    tx.commit().await?;

    tracing::info!(
        order_id = order.id,
        user_id,
        total_amount,
        items = lines.len(),
        cleared_cart_lines = cleared,
        "Order created"
    );

    order.payment_id = Some(payment.id);
    Ok(order)
}

/// Cancel an order on behalf of its owner.
///
/// Restores stock for every order item, sets the order to `cancelled`, and
/// fails any associated payment — all in one transaction, guarded by the
/// cancellable-status check against a locked row. The guard is what makes a
/// second cancellation (and therefore a double restock) impossible.
pub async fn cancel_order(
    pool: &PgPool,
    order_id: DbId,
    user_id: DbId,
) -> Result<Order, CheckoutError> {
    let mut tx = pool.begin().await?;

    let mut order = OrderRepo::find_for_update(&mut *tx, order_id)
        .await?
        .filter(|o| o.user_id == user_id)
        .ok_or(CoreError::NotFound {
            entity: "Order",
            id: order_id,
        })?;

    orders::validate_cancellable(order.status)?;

    for line in OrderItemRepo::restock_lines(&mut *tx, order_id).await? {
        VariantRepo::release(&mut *tx, line.variant_id, line.quantity).await?;
    }

    OrderRepo::set_status(&mut *tx, order_id, OrderStatus::Cancelled).await?;
    PaymentRepo::fail_for_order(&mut *tx, order_id).await?;

    tx.commit().await?;

    tracing::info!(order_id, user_id, "Order cancelled");

    order.status = OrderStatus::Cancelled;
    Ok(order)
}

/// Transition an order's status along the legal graph.
///
/// The current status is read with a row lock in the same transaction that
/// applies the update, so concurrent transitions serialize and each is
/// validated against the status it actually replaces.
pub async fn update_status(
    pool: &PgPool,
    order_id: DbId,
    new_status: OrderStatus,
) -> Result<Order, CheckoutError> {
    let mut tx = pool.begin().await?;

    let mut order = OrderRepo::find_for_update(&mut *tx, order_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Order",
            id: order_id,
        })?;

    orders::validate_transition(order.status, new_status)?;

    OrderRepo::set_status(&mut *tx, order_id, new_status).await?;

    tx.commit().await?;

    tracing::info!(order_id, from = %order.status, to = %new_status, "Order status updated");

    order.status = new_status;
    Ok(order)
}
