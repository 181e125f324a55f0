//! Repository for the `orders` table.

use sqlx::{PgConnection, PgPool};
use vastra_core::orders::OrderStatus;
use vastra_core::types::DbId;

use crate::models::order::{Order, OrderSummary};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, user_id, total_amount, status, payment_id, shipping_address_id, created_at";

/// CRUD and status operations for orders.
pub struct OrderRepo;

impl OrderRepo {
    /// Insert a new order in `pending` status. Runs on the checkout
    /// transaction.
    pub async fn insert(
        conn: &mut PgConnection,
        user_id: DbId,
        total_amount: f64,
        shipping_address_id: DbId,
    ) -> Result<Order, sqlx::Error> {
        let query = format!(
            "INSERT INTO orders (user_id, total_amount, status, shipping_address_id)
             VALUES ($1, $2, 'pending', $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(user_id)
            .bind(total_amount)
            .bind(shipping_address_id)
            .fetch_one(conn)
            .await
    }

    /// Find an order by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1");
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an order by ID, scoped to its owner.
    pub async fn find_by_id_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Load an order with a row lock, so a status check and the following
    /// update happen against the same state. Runs on the caller's
    /// transaction.
    pub async fn find_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Order history for a user, newest first, joined with shipping address
    /// and payment.
    pub async fn list_with_details(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<OrderSummary>, sqlx::Error> {
        sqlx::query_as::<_, OrderSummary>(
            "SELECT
                o.id,
                o.user_id,
                o.total_amount,
                o.status,
                o.created_at,
                ua.line1,
                ua.city,
                ua.state,
                ua.country,
                ua.zip_code,
                p.method AS payment_method,
                p.status AS payment_status,
                p.transaction_reference
             FROM orders o
             JOIN user_addresses ua ON o.shipping_address_id = ua.id
             LEFT JOIN payments p ON o.payment_id = p.id
             WHERE o.user_id = $1
             ORDER BY o.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Single order summary (address + payment join), scoped to its owner.
    pub async fn summary_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<OrderSummary>, sqlx::Error> {
        sqlx::query_as::<_, OrderSummary>(
            "SELECT
                o.id,
                o.user_id,
                o.total_amount,
                o.status,
                o.created_at,
                ua.line1,
                ua.city,
                ua.state,
                ua.country,
                ua.zip_code,
                p.method AS payment_method,
                p.status AS payment_status,
                p.transaction_reference
             FROM orders o
             JOIN user_addresses ua ON o.shipping_address_id = ua.id
             LEFT JOIN payments p ON o.payment_id = p.id
             WHERE o.id = $1 AND o.user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    /// Set an order's status. Runs on the caller's transaction; callers
    /// validate the transition against a locked row first.
    pub async fn set_status(
        conn: &mut PgConnection,
        id: DbId,
        status: OrderStatus,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE orders SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(conn)
            .await?;
        Ok(())
    }

    /// Link the payment row created during checkout. Runs on the checkout
    /// transaction.
    pub async fn set_payment(
        conn: &mut PgConnection,
        id: DbId,
        payment_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE orders SET payment_id = $2 WHERE id = $1")
            .bind(id)
            .bind(payment_id)
            .execute(conn)
            .await?;
        Ok(())
    }
}
