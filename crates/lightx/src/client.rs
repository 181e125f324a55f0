//! REST client for the LightX external API, wrapping [`reqwest`].

use serde::Deserialize;
use vastra_core::tryon::SegmentationType;

/// Default base URL of the LightX external API.
const DEFAULT_BASE_URL: &str = "https://api.lightxeditor.com/external/api/v2";

/// HTTP client for the LightX try-on endpoints.
///
/// Cheap to clone per request path is not needed; construct once at startup
/// and share behind an `Arc`.
pub struct LightXClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// Errors from the LightX API layer.
#[derive(Debug, thiserror::Error)]
pub enum LightXError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// LightX returned a non-2xx status code.
    #[error("LightX API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The provider reported that generation failed.
    #[error("LightX reported generation failed for order {order_id}")]
    GenerationFailed { order_id: String },

    /// The poll budget ran out before the job resolved.
    #[error("Try-on did not resolve within {attempts} polls")]
    Timeout { attempts: u32 },
}

/// `body` of the upload-slot response.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadSlotBody {
    /// Presigned URL to PUT the image bytes to.
    #[serde(rename = "uploadImage")]
    pub upload_url: String,
    /// Canonical URL the uploaded image will be served from; referenced in
    /// the try-on submission.
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

/// `body` of the try-on submission response.
#[derive(Debug, Clone, Deserialize)]
pub struct TryOnSubmissionBody {
    /// Provider-assigned job identifier, used for status polls.
    #[serde(rename = "orderId")]
    pub order_id: String,
    /// Provider hint: how many polls it recommends at most.
    #[serde(rename = "maxRetriesAllowed")]
    pub max_retries_allowed: Option<u32>,
    /// Provider hint: average time to completion in seconds.
    #[serde(rename = "avgResponseTimeInSec")]
    pub avg_response_time_secs: Option<u32>,
}

/// `body` of the order-status response.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderStatusBody {
    #[serde(rename = "orderId")]
    pub order_id: String,
    /// One of `init`, `active`, `failed`.
    pub status: String,
    /// Output image URL, present once status is `active`.
    pub output: Option<String>,
}

/// Response envelope shared by all LightX endpoints.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    body: T,
}

impl LightXClient {
    /// Create a client with the default base URL.
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Create a client against a specific base URL (used by tests to point
    /// at a stub server).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// Load the API key from `LIGHTX_API_KEY`. Returns `None` when unset,
    /// in which case try-on endpoints are unavailable.
    pub fn from_env() -> Option<Self> {
        std::env::var("LIGHTX_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .map(Self::new)
    }

    /// Request an upload slot for an image of `size` bytes.
    pub async fn request_upload_slot(
        &self,
        size: usize,
        content_type: &str,
    ) -> Result<UploadSlotBody, LightXError> {
        let body = serde_json::json!({
            "uploadType": "imageUrl",
            "size": size,
            "contentType": content_type,
        });

        let response = self
            .client
            .post(format!("{}/uploadImageUrl", self.base_url))
            .header("x-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        Self::parse_response::<UploadSlotBody>(response).await
    }

    /// PUT image bytes to a presigned upload URL from
    /// [`request_upload_slot`](Self::request_upload_slot).
    pub async fn upload_image(
        &self,
        upload_url: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), LightXError> {
        let response = self
            .client
            .put(upload_url)
            .header("Content-Type", content_type)
            .body(bytes)
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// Submit a try-on job for a portrait and an outfit image.
    pub async fn submit_try_on(
        &self,
        portrait_url: &str,
        outfit_url: &str,
        segmentation: SegmentationType,
    ) -> Result<TryOnSubmissionBody, LightXError> {
        let body = serde_json::json!({
            "imageUrl": portrait_url,
            "outfitImageUrl": outfit_url,
            "segmentationType": segmentation.code(),
        });

        let response = self
            .client
            .post(format!("{}/aivirtualtryon", self.base_url))
            .header("x-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        Self::parse_response::<TryOnSubmissionBody>(response).await
    }

    /// Fetch the current status of a submitted job.
    pub async fn order_status(&self, order_id: &str) -> Result<OrderStatusBody, LightXError> {
        let body = serde_json::json!({ "orderId": order_id });

        let response = self
            .client
            .post(format!("{}/order-status", self.base_url))
            .header("x-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        Self::parse_response::<OrderStatusBody>(response).await
    }

    /// Deserialize a 2xx envelope or surface the raw error body.
    async fn parse_response<T: for<'de> Deserialize<'de>>(
        response: reqwest::Response,
    ) -> Result<T, LightXError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LightXError::Api {
                status: status.as_u16(),
                body,
            });
        }
        let envelope: Envelope<T> = response.json().await?;
        Ok(envelope.body)
    }

    /// Ensure a response is 2xx, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), LightXError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LightXError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}
