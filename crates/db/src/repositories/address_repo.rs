//! Repository for the `user_addresses` table.

use sqlx::PgPool;
use vastra_core::types::DbId;

/// Ownership checks over shipping addresses. Address CRUD itself belongs to
/// the profile service.
pub struct AddressRepo;

impl AddressRepo {
    /// Whether the address exists and belongs to the user.
    pub async fn belongs_to_user(
        pool: &PgPool,
        address_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let found: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM user_addresses WHERE id = $1 AND user_id = $2")
                .bind(address_id)
                .bind(user_id)
                .fetch_optional(pool)
                .await?;
        Ok(found.is_some())
    }
}
