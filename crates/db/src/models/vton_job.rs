//! Try-on job models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vastra_core::tryon::{SegmentationType, TryOnStatus};
use vastra_core::types::{DbId, Timestamp};

/// A row from the `vton_jobs` table.
///
/// Created in `processing` status; the background poller moves it to a
/// terminal status exactly once. `generated_image_url` stays empty until
/// the job completes.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VtonJob {
    pub id: DbId,
    pub user_id: DbId,
    pub user_image_id: DbId,
    pub product_id: DbId,
    pub generated_image_url: String,
    pub provider_order_id: String,
    #[sqlx(try_from = "i16")]
    pub segmentation_type: SegmentationType,
    #[sqlx(try_from = "String")]
    pub status: TryOnStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for `POST /vton/generate`.
#[derive(Debug, Deserialize)]
pub struct GenerateTryOn {
    pub user_image_id: DbId,
    pub product_id: DbId,
    /// Defaults to upper-body when omitted.
    pub segmentation_type: Option<i16>,
}

/// Fields persisted when creating a new job row.
#[derive(Debug, Clone)]
pub struct NewVtonJob {
    pub user_id: DbId,
    pub user_image_id: DbId,
    pub product_id: DbId,
    pub provider_order_id: String,
    pub segmentation_type: SegmentationType,
}

/// A try-on job joined with product and portrait detail for history views.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VtonHistoryEntry {
    pub id: DbId,
    pub product_id: DbId,
    pub generated_image_url: String,
    #[sqlx(try_from = "String")]
    pub status: TryOnStatus,
    pub created_at: Timestamp,
    pub product_name: String,
    pub product_image_url: Option<String>,
    pub user_image_url: String,
}
