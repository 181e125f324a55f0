//! Background tasks.
//!
//! Each submodule provides an async function intended to be detached via
//! `tokio::spawn`, with its own error boundary: nothing in here propagates
//! into a request that has already completed.

pub mod tryon_poll;
