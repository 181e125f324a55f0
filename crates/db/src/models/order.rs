//! Order and order-item models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vastra_core::orders::OrderStatus;
use vastra_core::payments::PaymentMethod;
use vastra_core::types::{DbId, Timestamp};

/// A row from the `orders` table.
///
/// `total_amount` is computed once at creation and never recomputed.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Order {
    pub id: DbId,
    pub user_id: DbId,
    pub total_amount: f64,
    #[sqlx(try_from = "String")]
    pub status: OrderStatus,
    pub payment_id: Option<DbId>,
    pub shipping_address_id: DbId,
    pub created_at: Timestamp,
}

/// A row from the `order_items` table — the immutable snapshot of price and
/// quantity at the moment of purchase.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrderItem {
    pub id: DbId,
    pub order_id: DbId,
    pub variant_id: DbId,
    pub quantity: i32,
    pub price_at_purchase: f64,
}

/// DTO for `POST /orders`.
#[derive(Debug, Deserialize)]
pub struct CreateOrder {
    pub shipping_address_id: DbId,
    pub payment_method: PaymentMethod,
}

/// DTO for `PUT /orders/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatus {
    pub status: OrderStatus,
}

/// An order joined with its shipping address and payment for history views.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrderSummary {
    pub id: DbId,
    pub user_id: DbId,
    pub total_amount: f64,
    #[sqlx(try_from = "String")]
    pub status: OrderStatus,
    pub created_at: Timestamp,
    pub line1: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zip_code: String,
    pub payment_method: Option<String>,
    pub payment_status: Option<String>,
    pub transaction_reference: Option<String>,
}

/// An order item joined with product and variant detail.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrderItemDetail {
    pub id: DbId,
    pub order_id: DbId,
    pub variant_id: DbId,
    pub quantity: i32,
    pub price_at_purchase: f64,
    pub size: String,
    pub color: String,
    pub product_id: DbId,
    pub product_name: String,
    pub product_description: Option<String>,
    pub image_url: Option<String>,
}

/// Variant id / quantity pair used to restore stock on cancellation.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct RestockLine {
    pub variant_id: DbId,
    pub quantity: i32,
}
