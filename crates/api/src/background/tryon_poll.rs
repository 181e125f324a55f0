//! Detached poll task that resolves a submitted try-on job.
//!
//! Spawned by the generate handler after it has responded 202. Polls the
//! provider on a fixed interval up to a bounded number of attempts, then
//! writes the terminal status to the job row. The row-level guards in
//! `VtonJobRepo` make the terminal write single-shot, so a job is never
//! left in `processing` once this task finishes, and never overwritten
//! after it resolves.

use std::sync::Arc;

use sqlx::PgPool;
use tokio::task::JoinHandle;
use vastra_core::tryon::{MAX_POLL_ATTEMPTS, POLL_INTERVAL};
use vastra_core::types::DbId;
use vastra_db::repositories::VtonJobRepo;
use vastra_lightx::{poll_for_result, LightXClient};

/// Detach the poll loop for one submitted job.
pub fn spawn(
    pool: PgPool,
    client: Arc<LightXClient>,
    job_id: DbId,
    provider_order_id: String,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        run(pool, client, job_id, provider_order_id).await;
    })
}

/// Poll until the job resolves, then persist the outcome.
async fn run(pool: PgPool, client: Arc<LightXClient>, job_id: DbId, provider_order_id: String) {
    match poll_for_result(&client, &provider_order_id, POLL_INTERVAL, MAX_POLL_ATTEMPTS).await {
        Ok(output_url) => match VtonJobRepo::complete(&pool, job_id, &output_url).await {
            Ok(true) => tracing::info!(job_id, "Try-on job completed"),
            Ok(false) => {
                tracing::warn!(job_id, "Try-on job was already resolved; keeping first result")
            }
            Err(e) => tracing::error!(job_id, error = %e, "Failed to persist try-on completion"),
        },
        Err(e) => {
            tracing::warn!(job_id, error = %e, "Try-on job failed");
            if let Err(db_err) = VtonJobRepo::fail(&pool, job_id).await {
                tracing::error!(job_id, error = %db_err, "Failed to persist try-on failure");
            }
        }
    }
}
