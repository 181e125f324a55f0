//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods that
//! accept `&PgPool` as the first argument. Methods that must participate in
//! a caller-owned transaction (checkout, cancellation) take
//! `&mut PgConnection` instead.

pub mod address_repo;
pub mod cart_repo;
pub mod order_item_repo;
pub mod order_repo;
pub mod payment_repo;
pub mod product_media_repo;
pub mod user_image_repo;
pub mod variant_repo;
pub mod vton_job_repo;

pub use address_repo::AddressRepo;
pub use cart_repo::CartRepo;
pub use order_item_repo::OrderItemRepo;
pub use order_repo::OrderRepo;
pub use payment_repo::PaymentRepo;
pub use product_media_repo::ProductMediaRepo;
pub use user_image_repo::UserImageRepo;
pub use variant_repo::VariantRepo;
pub use vton_job_repo::VtonJobRepo;
