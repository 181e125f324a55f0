//! Repository for the `order_items` table.

use sqlx::{PgConnection, PgPool};
use vastra_core::types::DbId;

use crate::models::order::{OrderItem, OrderItemDetail, RestockLine};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, order_id, variant_id, quantity, price_at_purchase";

/// CRUD for the immutable per-order price snapshots.
pub struct OrderItemRepo;

impl OrderItemRepo {
    /// Insert one order item with its frozen purchase price. Runs on the
    /// checkout transaction.
    pub async fn insert(
        conn: &mut PgConnection,
        order_id: DbId,
        variant_id: DbId,
        quantity: i32,
        price_at_purchase: f64,
    ) -> Result<OrderItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO order_items (order_id, variant_id, quantity, price_at_purchase)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OrderItem>(&query)
            .bind(order_id)
            .bind(variant_id)
            .bind(quantity)
            .bind(price_at_purchase)
            .fetch_one(conn)
            .await
    }

    /// All items of an order.
    pub async fn list_by_order(
        pool: &PgPool,
        order_id: DbId,
    ) -> Result<Vec<OrderItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM order_items WHERE order_id = $1 ORDER BY id");
        sqlx::query_as::<_, OrderItem>(&query)
            .bind(order_id)
            .fetch_all(pool)
            .await
    }

    /// Items of an order joined with product/variant detail for order views.
    pub async fn list_detailed(
        pool: &PgPool,
        order_id: DbId,
    ) -> Result<Vec<OrderItemDetail>, sqlx::Error> {
        sqlx::query_as::<_, OrderItemDetail>(
            "SELECT
                oi.id,
                oi.order_id,
                oi.variant_id,
                oi.quantity,
                oi.price_at_purchase,
                pv.size,
                pv.color,
                p.id AS product_id,
                p.name AS product_name,
                p.description AS product_description,
                pm.url AS image_url
             FROM order_items oi
             JOIN product_variants pv ON oi.variant_id = pv.id
             JOIN products p ON pv.product_id = p.id
             LEFT JOIN product_media pm ON p.id = pm.product_id AND pm.is_primary
             WHERE oi.order_id = $1
             ORDER BY oi.id",
        )
        .bind(order_id)
        .fetch_all(pool)
        .await
    }

    /// Variant/quantity pairs for restoring stock on cancellation. Runs on
    /// the cancellation transaction.
    pub async fn restock_lines(
        conn: &mut PgConnection,
        order_id: DbId,
    ) -> Result<Vec<RestockLine>, sqlx::Error> {
        sqlx::query_as::<_, RestockLine>(
            "SELECT variant_id, quantity FROM order_items WHERE order_id = $1",
        )
        .bind(order_id)
        .fetch_all(conn)
        .await
    }
}
