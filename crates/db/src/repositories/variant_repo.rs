//! Repository for the `product_variants` table — the stock ledger.
//!
//! Reservation is a single conditional UPDATE (`stock >= quantity` in the
//! same statement), so two concurrent reservations against one variant can
//! never both pass a check that was valid for only one of them.

use sqlx::{PgConnection, PgPool};
use vastra_core::types::DbId;

use crate::models::variant::Variant;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, product_id, size, color, stock, additional_price, created_at";

/// Stock ledger operations for product variants.
pub struct VariantRepo;

impl VariantRepo {
    /// Find a variant by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Variant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM product_variants WHERE id = $1");
        sqlx::query_as::<_, Variant>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether the variant currently has at least `quantity` units in stock.
    ///
    /// Advisory only: the authoritative check happens inside
    /// [`reserve`](Self::reserve).
    pub async fn check_available(
        pool: &PgPool,
        variant_id: DbId,
        quantity: i32,
    ) -> Result<bool, sqlx::Error> {
        let available: Option<bool> =
            sqlx::query_scalar("SELECT stock >= $2 FROM product_variants WHERE id = $1")
                .bind(variant_id)
                .bind(quantity)
                .fetch_optional(pool)
                .await?;
        Ok(available.unwrap_or(false))
    }

    /// Atomically decrement stock if at least `quantity` units remain.
    ///
    /// Returns `false` when the guard fails (insufficient stock or unknown
    /// variant) — no row is touched in that case. Runs on the caller's
    /// transaction so a later failure in the same checkout rolls the
    /// decrement back.
    pub async fn reserve(
        conn: &mut PgConnection,
        variant_id: DbId,
        quantity: i32,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE product_variants SET stock = stock - $2 WHERE id = $1 AND stock >= $2",
        )
        .bind(variant_id)
        .bind(quantity)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Add `quantity` units back to stock.
    ///
    /// Unconditional; only reachable from the cancellation transaction,
    /// whose status guard ensures it runs at most once per order.
    pub async fn release(
        conn: &mut PgConnection,
        variant_id: DbId,
        quantity: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE product_variants SET stock = stock + $2 WHERE id = $1")
            .bind(variant_id)
            .bind(quantity)
            .execute(conn)
            .await?;
        Ok(())
    }

    /// Current stock level, for tests and admin views.
    pub async fn stock_of(pool: &PgPool, variant_id: DbId) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar("SELECT stock FROM product_variants WHERE id = $1")
            .bind(variant_id)
            .fetch_optional(pool)
            .await
    }
}
