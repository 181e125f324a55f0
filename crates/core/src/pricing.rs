//! Cart pricing arithmetic.
//!
//! Unit prices are computed once, at snapshot time, and frozen into
//! `order_items.price_at_purchase`. Later price or discount changes never
//! affect an existing order.

use crate::error::CoreError;

/// Effective unit price of a variant:
/// `(product_price + additional_price) * (1 - discount_percent / 100)`.
pub fn unit_price(product_price: f64, additional_price: f64, discount_percent: f64) -> f64 {
    (product_price + additional_price) * (1.0 - discount_percent / 100.0)
}

/// Total for one cart line.
pub fn line_total(unit_price: f64, quantity: i32) -> f64 {
    unit_price * f64::from(quantity)
}

/// Round a monetary amount to 2 decimal places for presentation.
pub fn round_money(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Validate a computed order total before it is persisted.
///
/// Rejects NaN, infinities, and negative values with
/// [`CoreError::InvalidTotal`]. A zero total is legal (fully discounted
/// carts exist).
pub fn validate_total(total: f64) -> Result<f64, CoreError> {
    if !total.is_finite() || total < 0.0 {
        return Err(CoreError::InvalidTotal(total));
    }
    Ok(total)
}
