//! Repository for the `cart_items` table.

use sqlx::{PgConnection, PgPool};
use vastra_core::types::DbId;

use crate::models::cart::{CartItem, CartLineDetail, SnapshotLine};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, variant_id, quantity, created_at";

/// CRUD and snapshot reads for cart lines.
pub struct CartRepo;

impl CartRepo {
    /// Read-only pricing snapshot of a user's cart for checkout.
    ///
    /// Joins each line with its variant and product so the caller can price
    /// and stock-check every line without further queries. Does not mutate
    /// anything.
    pub async fn snapshot_lines(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<SnapshotLine>, sqlx::Error> {
        sqlx::query_as::<_, SnapshotLine>(
            "SELECT
                c.variant_id,
                c.quantity,
                pv.stock,
                p.price AS product_price,
                pv.additional_price,
                p.discount AS discount_percent
             FROM cart_items c
             JOIN product_variants pv ON c.variant_id = pv.id
             JOIN products p ON pv.product_id = p.id
             WHERE c.user_id = $1
             ORDER BY c.id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Cart lines with product/variant display detail for `GET /cart`.
    pub async fn detailed_lines(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<CartLineDetail>, sqlx::Error> {
        sqlx::query_as::<_, CartLineDetail>(
            "SELECT
                c.id,
                c.variant_id,
                c.quantity,
                pv.size,
                pv.color,
                pv.stock,
                pv.additional_price,
                p.id AS product_id,
                p.name AS product_name,
                p.price AS product_price,
                p.discount AS product_discount,
                pm.url AS image_url
             FROM cart_items c
             JOIN product_variants pv ON c.variant_id = pv.id
             JOIN products p ON pv.product_id = p.id
             LEFT JOIN product_media pm ON p.id = pm.product_id AND pm.is_primary
             WHERE c.user_id = $1
             ORDER BY c.id DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Find the line a user already has for a variant, if any.
    pub async fn find_line(
        pool: &PgPool,
        user_id: DbId,
        variant_id: DbId,
    ) -> Result<Option<CartItem>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM cart_items WHERE user_id = $1 AND variant_id = $2");
        sqlx::query_as::<_, CartItem>(&query)
            .bind(user_id)
            .bind(variant_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a cart line by ID, scoped to its owner.
    pub async fn find_by_id_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<CartItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cart_items WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, CartItem>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new cart line.
    pub async fn insert_line(
        pool: &PgPool,
        user_id: DbId,
        variant_id: DbId,
        quantity: i32,
    ) -> Result<CartItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO cart_items (user_id, variant_id, quantity)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CartItem>(&query)
            .bind(user_id)
            .bind(variant_id)
            .bind(quantity)
            .fetch_one(pool)
            .await
    }

    /// Set the quantity of an existing line. Returns `None` if the line is
    /// gone.
    pub async fn set_quantity(
        pool: &PgPool,
        id: DbId,
        quantity: i32,
    ) -> Result<Option<CartItem>, sqlx::Error> {
        let query = format!(
            "UPDATE cart_items SET quantity = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CartItem>(&query)
            .bind(id)
            .bind(quantity)
            .fetch_optional(pool)
            .await
    }

    /// Delete a cart line scoped to its owner. Returns `true` if a row was
    /// removed.
    pub async fn delete_line(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cart_items WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove every line of a user's cart. Runs on the checkout transaction.
    pub async fn clear(conn: &mut PgConnection, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
            .bind(user_id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }
}
