//! Authentication: JWT validation and the [`AuthUser`] extractor.
//!
//! Identity is issued by an external service; this layer only verifies the
//! HS256 Bearer token and exposes the caller's id and role to handlers.

pub mod extractor;
pub mod jwt;

pub use extractor::AuthUser;

use vastra_core::error::CoreError;

/// Role name that unlocks the admin-only endpoints.
pub const ROLE_ADMIN: &str = "admin";

/// Reject non-admin callers with [`CoreError::Forbidden`].
pub fn require_admin(user: &AuthUser) -> Result<(), CoreError> {
    if user.role == ROLE_ADMIN {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "This endpoint requires the admin role".into(),
        ))
    }
}
