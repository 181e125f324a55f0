//! Repository for the `user_images` table (stored try-on portraits).

use sqlx::PgPool;
use vastra_core::types::DbId;

use crate::models::user_image::UserImage;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, image_url, s3_key, created_at";

/// CRUD for stored try-on portraits.
pub struct UserImageRepo;

impl UserImageRepo {
    /// Persist an uploaded portrait.
    pub async fn insert(
        pool: &PgPool,
        user_id: DbId,
        image_url: &str,
        s3_key: &str,
    ) -> Result<UserImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_images (user_id, image_url, s3_key)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserImage>(&query)
            .bind(user_id)
            .bind(image_url)
            .bind(s3_key)
            .fetch_one(pool)
            .await
    }

    /// All portraits of a user, newest first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<UserImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_images WHERE user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, UserImage>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Find a portrait by ID, scoped to its owner.
    pub async fn find_by_id_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<UserImage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_images WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, UserImage>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a portrait scoped to its owner. Returns `true` if a row was
    /// removed.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM user_images WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
