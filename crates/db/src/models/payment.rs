//! Payment models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vastra_core::payments::{PaymentMethod, PaymentStatus};
use vastra_core::types::{DbId, Timestamp};

/// A row from the `payments` table. At most one per order.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Payment {
    pub id: DbId,
    pub order_id: DbId,
    #[sqlx(try_from = "String")]
    pub method: PaymentMethod,
    #[sqlx(try_from = "String")]
    pub status: PaymentStatus,
    pub transaction_reference: Option<String>,
    pub paid_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for `POST /payments/initiate`.
#[derive(Debug, Deserialize)]
pub struct InitiatePayment {
    pub order_id: DbId,
    pub payment_method: PaymentMethod,
}

/// DTO for `POST /payments/verify`.
#[derive(Debug, Deserialize)]
pub struct VerifyPayment {
    pub order_id: DbId,
    pub payment_intent_id: String,
}
