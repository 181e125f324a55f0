//! Repository for the `payments` table.
//!
//! The `uq_payments_order` unique constraint keeps at most one payment row
//! per order; re-initiating a payment rewrites the method on the existing
//! row instead of stacking new ones.

use sqlx::{PgConnection, PgPool};
use vastra_core::payments::PaymentMethod;
use vastra_core::types::DbId;

use crate::models::payment::Payment;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, order_id, method, status, transaction_reference, paid_at, created_at";

/// CRUD and settlement operations for payments.
pub struct PaymentRepo;

impl PaymentRepo {
    /// Insert the initial `pending` payment row for a new order. Runs on the
    /// checkout transaction.
    pub async fn insert(
        conn: &mut PgConnection,
        order_id: DbId,
        method: PaymentMethod,
    ) -> Result<Payment, sqlx::Error> {
        let query = format!(
            "INSERT INTO payments (order_id, method, status)
             VALUES ($1, $2, 'pending')
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(order_id)
            .bind(method.as_str())
            .fetch_one(conn)
            .await
    }

    /// The payment row for an order, if one exists.
    pub async fn find_by_order(
        pool: &PgPool,
        order_id: DbId,
    ) -> Result<Option<Payment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM payments WHERE order_id = $1");
        sqlx::query_as::<_, Payment>(&query)
            .bind(order_id)
            .fetch_optional(pool)
            .await
    }

    /// Rewrite the payment method for an order, resetting status to
    /// `pending` and storing the provider reference when one exists.
    ///
    /// Creates the row when the order has none yet and links it back via
    /// `orders.payment_id`, all in one transaction.
    pub async fn upsert_method(
        pool: &PgPool,
        order_id: DbId,
        method: PaymentMethod,
        transaction_reference: Option<&str>,
    ) -> Result<Payment, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO payments (order_id, method, status, transaction_reference)
             VALUES ($1, $2, 'pending', $3)
             ON CONFLICT ON CONSTRAINT uq_payments_order DO UPDATE SET
                method = EXCLUDED.method,
                status = 'pending',
                transaction_reference = EXCLUDED.transaction_reference
             RETURNING {COLUMNS}"
        );
        let payment = sqlx::query_as::<_, Payment>(&query)
            .bind(order_id)
            .bind(method.as_str())
            .bind(transaction_reference)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("UPDATE orders SET payment_id = $2 WHERE id = $1")
            .bind(order_id)
            .bind(payment.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(payment)
    }

    /// Apply a successful provider verification: payment -> `completed`
    /// with `paid_at`, order -> `paid`.
    ///
    /// Idempotent: the guard on `status <> 'completed'` makes a repeated
    /// verification a no-op, so side effects are never double-applied.
    /// Returns `false` when no pending payment matched (already completed,
    /// or unknown reference).
    pub async fn mark_paid(
        pool: &PgPool,
        order_id: DbId,
        transaction_reference: &str,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query(
            "UPDATE payments SET status = 'completed', paid_at = NOW()
             WHERE order_id = $1 AND transaction_reference = $2 AND status <> 'completed'",
        )
        .bind(order_id)
        .bind(transaction_reference)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query("UPDATE orders SET status = 'paid' WHERE id = $1")
            .bind(order_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Mark the payment for an order as `failed` (pool variant, used by
    /// card verification rejections).
    pub async fn mark_failed(
        pool: &PgPool,
        order_id: DbId,
        transaction_reference: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE payments SET status = 'failed'
             WHERE order_id = $1 AND transaction_reference = $2",
        )
        .bind(order_id)
        .bind(transaction_reference)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Fail whatever payment row an order has. Runs on the cancellation
    /// transaction.
    pub async fn fail_for_order(
        conn: &mut PgConnection,
        order_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE payments SET status = 'failed' WHERE order_id = $1")
            .bind(order_id)
            .execute(conn)
            .await?;
        Ok(())
    }
}
