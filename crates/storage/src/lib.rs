//! Object-store capability over S3.
//!
//! The rest of the system only needs three things from blob storage: a
//! time-limited upload URL for the client, a time-limited download URL for
//! a private key, and fetching bytes given a URL. Everything else about S3
//! stays behind this crate.

use std::time::Duration;

use aws_sdk_s3::presigning::PresigningConfig;

/// How long presigned URLs stay valid.
const PRESIGN_EXPIRY: Duration = Duration::from_secs(300);

/// Errors from the object-store layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Presigning or another SDK-level operation failed.
    #[error("S3 error: {0}")]
    Sdk(String),

    /// Fetching bytes over HTTP failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The object host returned a non-2xx status code.
    #[error("Object fetch failed with status {status}")]
    Fetch { status: u16 },
}

/// A presigned upload slot handed to the client.
#[derive(Debug, Clone)]
pub struct UploadSlot {
    /// URL to PUT the bytes to.
    pub upload_url: String,
    /// Public URL the object will be served from.
    pub file_url: String,
    /// Object key, persisted so private downloads can be presigned later.
    pub key: String,
}

/// S3-backed object store for try-on portraits.
pub struct S3Store {
    client: aws_sdk_s3::Client,
    http: reqwest::Client,
    bucket: String,
    region: String,
}

impl S3Store {
    /// Build the store from ambient AWS configuration plus
    /// `AWS_BUCKET_NAME` / `AWS_REGION`. Returns `None` when the bucket is
    /// not configured; portrait uploads are then unavailable.
    pub async fn from_env() -> Option<Self> {
        let bucket = std::env::var("AWS_BUCKET_NAME")
            .ok()
            .filter(|b| !b.is_empty())?;
        let region = std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".into());

        let config = aws_config::load_from_env().await;
        Some(Self {
            client: aws_sdk_s3::Client::new(&config),
            http: reqwest::Client::new(),
            bucket,
            region,
        })
    }

    /// Presign an upload for a new object under `prefix`.
    ///
    /// The key gets a UUID suffix so repeated uploads of the same file name
    /// never collide.
    pub async fn presign_upload(
        &self,
        prefix: &str,
        file_name: &str,
        content_type: &str,
    ) -> Result<UploadSlot, StorageError> {
        let key = format!("{prefix}/{file_name}-{}", uuid::Uuid::new_v4());

        let presigned = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(content_type)
            .presigned(
                PresigningConfig::expires_in(PRESIGN_EXPIRY)
                    .map_err(|e| StorageError::Sdk(e.to_string()))?,
            )
            .await
            .map_err(|e| StorageError::Sdk(e.to_string()))?;

        let file_url = format!(
            "https://{}.s3.{}.amazonaws.com/{key}",
            self.bucket, self.region
        );

        Ok(UploadSlot {
            upload_url: presigned.uri().to_string(),
            file_url,
            key,
        })
    }

    /// Presign a download URL for a private object key.
    pub async fn presign_download(&self, key: &str) -> Result<String, StorageError> {
        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(
                PresigningConfig::expires_in(PRESIGN_EXPIRY)
                    .map_err(|e| StorageError::Sdk(e.to_string()))?,
            )
            .await
            .map_err(|e| StorageError::Sdk(e.to_string()))?;

        Ok(presigned.uri().to_string())
    }

    /// Fetch an object's bytes given any URL (presigned or public).
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, StorageError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::Fetch {
                status: status.as_u16(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}
