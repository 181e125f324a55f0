//! Stored try-on portrait models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vastra_core::types::{DbId, Timestamp};

/// A row from the `user_images` table: a portrait uploaded for try-on.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserImage {
    pub id: DbId,
    pub user_id: DbId,
    pub image_url: String,
    pub s3_key: String,
    pub created_at: Timestamp,
}

/// DTO for `POST /vton/user-images`, sent after the client finishes its
/// presigned upload.
#[derive(Debug, Deserialize)]
pub struct SaveUserImage {
    pub image_url: String,
    pub s3_key: String,
}
