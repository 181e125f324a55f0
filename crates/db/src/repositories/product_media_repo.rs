//! Repository for the `product_media` table.

use sqlx::PgPool;
use vastra_core::types::DbId;

/// Reads over product media. Only the primary image is needed by the
/// try-on pipeline.
pub struct ProductMediaRepo;

impl ProductMediaRepo {
    /// URL of a product's primary image, if it has one.
    pub async fn primary_url(
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT url FROM product_media WHERE product_id = $1 AND is_primary LIMIT 1",
        )
        .bind(product_id)
        .fetch_optional(pool)
        .await
    }
}
