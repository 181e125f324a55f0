//! Product variant model.

use serde::Serialize;
use sqlx::FromRow;
use vastra_core::types::{DbId, Timestamp};

/// A row from the `product_variants` table.
///
/// `stock` is mutated only by order creation (conditional decrement) and
/// order cancellation (increment); it can never go negative.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Variant {
    pub id: DbId,
    pub product_id: DbId,
    pub size: String,
    pub color: String,
    pub stock: i32,
    pub additional_price: f64,
    pub created_at: Timestamp,
}
