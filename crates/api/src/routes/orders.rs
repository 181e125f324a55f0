//! Route definitions for the `/orders` resource.
//!
//! All endpoints require authentication; the status transition is admin
//! only (enforced in the handler).

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::orders;
use crate::state::AppState;

/// Routes mounted at `/orders`.
///
/// ```text
/// GET    /               -> list_orders
/// POST   /               -> create_order
/// GET    /{id}           -> get_order
/// PUT    /{id}/cancel    -> cancel_order
/// PUT    /{id}/status    -> update_status (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::list_orders).post(orders::create_order))
        .route("/{id}", get(orders::get_order))
        .route("/{id}/cancel", put(orders::cancel_order))
        .route("/{id}/status", put(orders::update_status))
}
