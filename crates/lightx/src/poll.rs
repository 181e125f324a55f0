//! Bounded status polling for a submitted try-on job.

use std::time::Duration;

use crate::client::{LightXClient, LightXError};
use crate::{STATUS_ACTIVE, STATUS_FAILED};

/// Poll the provider until the job resolves or the attempt budget runs out.
///
/// Returns the output image URL on success. A provider-reported failure
/// resolves immediately; any *error* inside an individual poll attempt
/// (network, malformed response) is logged and swallowed so transient
/// provider hiccups do not burn the job — only attempt exhaustion does.
///
/// This runs after the triggering HTTP response has already been sent, so
/// nothing here propagates to a caller; the returned error is recorded on
/// the job row by the background task.
pub async fn poll_for_result(
    client: &LightXClient,
    order_id: &str,
    interval: Duration,
    max_attempts: u32,
) -> Result<String, LightXError> {
    tracing::debug!(
        order_id,
        max_attempts,
        interval_secs = interval.as_secs(),
        "Polling try-on status"
    );

    for attempt in 1..=max_attempts {
        if attempt > 1 {
            tokio::time::sleep(interval).await;
        }

        match client.order_status(order_id).await {
            Ok(status) => {
                if status.status == STATUS_ACTIVE {
                    if let Some(output) = status.output.filter(|o| !o.is_empty()) {
                        tracing::debug!(order_id, attempt, "Try-on resolved");
                        return Ok(output);
                    }
                    // `active` without an output URL yet; keep polling.
                } else if status.status == STATUS_FAILED {
                    return Err(LightXError::GenerationFailed {
                        order_id: order_id.to_string(),
                    });
                }
            }
            Err(e) => {
                tracing::warn!(order_id, attempt, error = %e, "Status poll attempt failed");
            }
        }
    }

    Err(LightXError::Timeout {
        attempts: max_attempts,
    })
}
