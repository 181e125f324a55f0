//! Entity models and DTOs.
//!
//! Row structs derive `FromRow` + `Serialize`; request DTOs derive
//! `Deserialize` (and `Validate` where a field carries a range rule).
//! Partial updates use `Option<T>` per column so only provided fields
//! are touched.

pub mod cart;
pub mod order;
pub mod payment;
pub mod user_image;
pub mod variant;
pub mod vton_job;
