//! Minimal Stripe payment-intents client.
//!
//! Only the two calls the payment flow needs: create an intent and retrieve
//! one by id. The client is constructed once at startup from the
//! environment and injected into the API state; when `STRIPE_SECRET_KEY` is
//! absent, card payments are reported as not configured rather than failing
//! the whole server.

use serde::Deserialize;

/// Base URL of the Stripe REST API.
const API_BASE_URL: &str = "https://api.stripe.com/v1";

/// Intent status Stripe reports once the charge went through.
pub const INTENT_SUCCEEDED: &str = "succeeded";

/// HTTP client for the Stripe payment-intents endpoints.
pub struct StripeClient {
    client: reqwest::Client,
    base_url: String,
    secret_key: String,
}

/// Errors from the Stripe API layer.
#[derive(Debug, thiserror::Error)]
pub enum StripeError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Stripe returned a non-2xx status code.
    #[error("Stripe API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// The subset of a payment-intent object the payment flow reads.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    /// Provider-assigned intent id, stored as the payment's
    /// `transaction_reference`.
    pub id: String,
    /// Secret handed to the storefront to confirm the payment client-side.
    pub client_secret: Option<String>,
    /// Intent lifecycle status (`requires_payment_method`, `processing`,
    /// `succeeded`, ...).
    pub status: String,
}

impl StripeClient {
    /// Create a client for the live Stripe API.
    pub fn new(secret_key: String) -> Self {
        Self::with_base_url(secret_key, API_BASE_URL.to_string())
    }

    /// Create a client against a specific base URL (used by tests to point
    /// at a stub server).
    pub fn with_base_url(secret_key: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            secret_key,
        }
    }

    /// Load the secret key from `STRIPE_SECRET_KEY`. Returns `None` when
    /// unset; card payments are then unavailable.
    pub fn from_env() -> Option<Self> {
        std::env::var("STRIPE_SECRET_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .map(Self::new)
    }

    /// Create a payment intent for `amount_minor` minor units of `currency`,
    /// tagged with the order and user ids so the charge can be traced back.
    pub async fn create_payment_intent(
        &self,
        amount_minor: i64,
        currency: &str,
        order_id: i64,
        user_id: i64,
    ) -> Result<PaymentIntent, StripeError> {
        let amount = amount_minor.to_string();
        let order_id = order_id.to_string();
        let user_id = user_id.to_string();
        let params: [(&str, &str); 6] = [
            ("amount", &amount),
            ("currency", currency),
            ("metadata[order_id]", &order_id),
            ("metadata[user_id]", &user_id),
            ("automatic_payment_methods[enabled]", "true"),
            ("description", "Vastra order payment"),
        ];

        let response = self
            .client
            .post(format!("{}/payment_intents", self.base_url))
            .bearer_auth(&self.secret_key)
            .form(&params)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Retrieve a payment intent by id.
    pub async fn retrieve_payment_intent(
        &self,
        intent_id: &str,
    ) -> Result<PaymentIntent, StripeError> {
        let response = self
            .client
            .get(format!("{}/payment_intents/{intent_id}", self.base_url))
            .bearer_auth(&self.secret_key)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Deserialize a 2xx response or surface the raw error body.
    async fn parse_response(response: reqwest::Response) -> Result<PaymentIntent, StripeError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StripeError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }
}
