//! Cart models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use vastra_core::pricing;
use vastra_core::types::{DbId, Timestamp};

/// Maximum quantity of a single variant per cart line.
pub const MAX_LINE_QUANTITY: i32 = 10;

/// A row from the `cart_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CartItem {
    pub id: DbId,
    pub user_id: DbId,
    pub variant_id: DbId,
    pub quantity: i32,
    pub created_at: Timestamp,
}

/// DTO for `POST /cart`.
#[derive(Debug, Deserialize, Validate)]
pub struct AddCartItem {
    pub variant_id: DbId,
    #[validate(range(min = 1, max = 10))]
    pub quantity: i32,
}

/// DTO for `PUT /cart/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCartItem {
    #[validate(range(min = 1, max = 10))]
    pub quantity: i32,
}

/// One cart line joined with variant and product pricing data, as read by
/// the checkout snapshot. Prices are raw columns; the effective unit price
/// is derived in [`SnapshotLine::unit_price`] so the arithmetic has a single
/// home in `vastra_core::pricing`.
#[derive(Debug, Clone, FromRow)]
pub struct SnapshotLine {
    pub variant_id: DbId,
    pub quantity: i32,
    pub stock: i32,
    pub product_price: f64,
    pub additional_price: f64,
    pub discount_percent: f64,
}

impl SnapshotLine {
    /// Effective unit price after variant surcharge and product discount.
    pub fn unit_price(&self) -> f64 {
        pricing::unit_price(self.product_price, self.additional_price, self.discount_percent)
    }

    /// `unit_price * quantity`.
    pub fn line_total(&self) -> f64 {
        pricing::line_total(self.unit_price(), self.quantity)
    }
}

/// One cart line joined with display detail for `GET /cart`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CartLineDetail {
    pub id: DbId,
    pub variant_id: DbId,
    pub quantity: i32,
    pub size: String,
    pub color: String,
    pub stock: i32,
    pub additional_price: f64,
    pub product_id: DbId,
    pub product_name: String,
    pub product_price: f64,
    pub product_discount: f64,
    pub image_url: Option<String>,
}

impl CartLineDetail {
    /// Total for this line at current prices, rounded to cents.
    pub fn line_total(&self) -> f64 {
        let unit =
            pricing::unit_price(self.product_price, self.additional_price, self.product_discount);
        pricing::round_money(pricing::line_total(unit, self.quantity))
    }
}
