//! Request handlers, grouped by resource.

pub mod cart;
pub mod orders;
pub mod payments;
pub mod tryon;
