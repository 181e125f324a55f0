use std::sync::Arc;

use vastra_lightx::LightXClient;
use vastra_storage::S3Store;
use vastra_stripe::StripeClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// The provider clients are constructed once at process start; `None` means
/// the corresponding capability is not configured and its endpoints report
/// that instead of failing at startup.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: vastra_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Stripe payment-intent client (card payments).
    pub stripe: Option<Arc<StripeClient>>,
    /// LightX try-on client.
    pub lightx: Option<Arc<LightXClient>>,
    /// S3 object store for try-on portraits.
    pub storage: Option<Arc<S3Store>>,
}
