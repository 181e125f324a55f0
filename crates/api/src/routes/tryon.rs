//! Route definitions for the `/vton` resource.
//!
//! All endpoints require authentication.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::tryon;
use crate::state::AppState;

/// Routes mounted at `/vton`.
///
/// ```text
/// GET    /upload-url          -> upload_url
/// POST   /user-images         -> save_user_image
/// GET    /user-images         -> list_user_images
/// DELETE /user-images/{id}    -> delete_user_image
/// POST   /generate            -> generate (202)
/// GET    /jobs/{id}           -> job_status
/// GET    /history             -> history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/upload-url", get(tryon::upload_url))
        .route(
            "/user-images",
            get(tryon::list_user_images).post(tryon::save_user_image),
        )
        .route("/user-images/{id}", delete(tryon::delete_user_image))
        .route("/generate", post(tryon::generate))
        .route("/jobs/{id}", get(tryon::job_status))
        .route("/history", get(tryon::history))
}
