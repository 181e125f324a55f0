use crate::types::DbId;

/// Domain error taxonomy shared by every crate in the workspace.
///
/// Each variant maps to a stable HTTP status and machine code in
/// `vastra-api::error`. Construct these from domain logic; transport
/// concerns (sqlx, reqwest) are wrapped at the API boundary.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// An operation is not legal in the entity's current status
    /// (illegal order transition, paying a cancelled order, ...).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Cart is empty")]
    EmptyCart,

    /// A reservation or snapshot found less stock than requested.
    #[error("Insufficient stock for variant {variant_id}: requested {requested}, available {available}")]
    InsufficientStock {
        variant_id: DbId,
        requested: i32,
        available: i32,
    },

    /// A computed order total was not a finite, non-negative number.
    #[error("Invalid order total: {0}")]
    InvalidTotal(f64),

    /// Card payments require a configured payment provider.
    #[error("Payment processing is not configured")]
    PaymentNotConfigured,

    /// The payment provider reported a non-success intent status.
    #[error("Payment verification failed: provider status '{provider_status}'")]
    VerificationFailed { provider_status: String },

    /// An external capability (object store, try-on provider, payment
    /// provider) failed during a request.
    #[error("External provider error: {0}")]
    ExternalProvider(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
