//! Repository for the `vton_jobs` table.
//!
//! A job row is written once in `processing` and moved to a terminal
//! status exactly once; both terminal updates are guarded on
//! `status = 'processing'` so a late poller can never overwrite a result.

use sqlx::PgPool;
use vastra_core::types::DbId;

use crate::models::vton_job::{NewVtonJob, VtonHistoryEntry, VtonJob};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, user_id, user_image_id, product_id, generated_image_url, \
    provider_order_id, segmentation_type, status, created_at, updated_at";

/// CRUD and state transitions for try-on jobs.
pub struct VtonJobRepo;

impl VtonJobRepo {
    /// Insert a new job in `processing` status.
    pub async fn insert(pool: &PgPool, input: &NewVtonJob) -> Result<VtonJob, sqlx::Error> {
        let query = format!(
            "INSERT INTO vton_jobs
                (user_id, user_image_id, product_id, provider_order_id, segmentation_type, status)
             VALUES ($1, $2, $3, $4, $5, 'processing')
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VtonJob>(&query)
            .bind(input.user_id)
            .bind(input.user_image_id)
            .bind(input.product_id)
            .bind(&input.provider_order_id)
            .bind(input.segmentation_type.code())
            .fetch_one(pool)
            .await
    }

    /// Find a job by ID, scoped to its owner.
    pub async fn find_by_id_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<VtonJob>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vton_jobs WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, VtonJob>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Move a processing job to `completed` with its output URL.
    ///
    /// Returns `false` if the job was not in `processing` (already
    /// resolved).
    pub async fn complete(pool: &PgPool, id: DbId, output_url: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE vton_jobs
             SET generated_image_url = $2, status = 'completed', updated_at = NOW()
             WHERE id = $1 AND status = 'processing'",
        )
        .bind(id)
        .bind(output_url)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Move a processing job to `failed`.
    ///
    /// Returns `false` if the job was not in `processing`.
    pub async fn fail(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE vton_jobs SET status = 'failed', updated_at = NOW()
             WHERE id = $1 AND status = 'processing'",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// A user's try-on history, newest first, joined with product and
    /// portrait detail.
    pub async fn history(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<VtonHistoryEntry>, sqlx::Error> {
        sqlx::query_as::<_, VtonHistoryEntry>(
            "SELECT
                vj.id,
                vj.product_id,
                vj.generated_image_url,
                vj.status,
                vj.created_at,
                p.name AS product_name,
                pm.url AS product_image_url,
                ui.image_url AS user_image_url
             FROM vton_jobs vj
             JOIN products p ON vj.product_id = p.id
             JOIN user_images ui ON vj.user_image_id = ui.id
             LEFT JOIN product_media pm ON p.id = pm.product_id AND pm.is_primary
             WHERE vj.user_id = $1
             ORDER BY vj.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
