//! HTTP client for the LightX virtual try-on API.
//!
//! The provider protocol is: request an upload slot, PUT the image bytes to
//! the returned presigned URL, submit a try-on job referencing the canonical
//! image URLs, then poll the order-status endpoint until the job resolves.

mod client;
mod poll;

pub use client::{
    LightXClient, LightXError, OrderStatusBody, TryOnSubmissionBody, UploadSlotBody,
};
pub use poll::poll_for_result;

/// Provider-side job status: queued, still generating.
pub const STATUS_INIT: &str = "init";
/// Provider-side job status: output ready.
pub const STATUS_ACTIVE: &str = "active";
/// Provider-side job status: generation failed.
pub const STATUS_FAILED: &str = "failed";
