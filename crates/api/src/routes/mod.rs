//! Route tree.

pub mod cart;
pub mod health;
pub mod orders;
pub mod payments;
pub mod tryon;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /cart                        get, add (auth required)
/// /cart/{id}                   update quantity, remove
///
/// /orders                      history, create
/// /orders/{id}                 detail
/// /orders/{id}/cancel          cancel (owner)
/// /orders/{id}/status          transition status (admin only)
///
/// /payments/initiate           initiate payment
/// /payments/verify             verify card payment
/// /payments/{order_id}         payment status
///
/// /vton/upload-url             presigned portrait upload URL
/// /vton/user-images            save, list portraits
/// /vton/user-images/{id}       delete portrait
/// /vton/generate               start try-on job (202)
/// /vton/jobs/{id}              job status
/// /vton/history                try-on history
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/cart", cart::router())
        .nest("/orders", orders::router())
        .nest("/payments", payments::router())
        .nest("/vton", tryon::router())
}
