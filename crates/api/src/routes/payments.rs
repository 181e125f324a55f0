//! Route definitions for the `/payments` resource.
//!
//! All endpoints require authentication.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::payments;
use crate::state::AppState;

/// Routes mounted at `/payments`.
///
/// ```text
/// POST   /initiate      -> initiate
/// POST   /verify        -> verify
/// GET    /{order_id}    -> status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/initiate", post(payments::initiate))
        .route("/verify", post(payments::verify))
        .route("/{order_id}", get(payments::status))
}
