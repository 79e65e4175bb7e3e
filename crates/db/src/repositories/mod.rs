//! Repository layer: one zero-sized struct per table with async query methods.

pub mod blog_post_repo;
pub mod category_repo;
pub mod contact_repo;
pub mod order_item_repo;
pub mod order_repo;
pub mod product_repo;
pub mod project_repo;
pub mod review_repo;
pub mod tag_repo;
pub mod user_repo;

pub use blog_post_repo::BlogPostRepo;
pub use category_repo::CategoryRepo;
pub use contact_repo::ContactRepo;
pub use order_item_repo::OrderItemRepo;
pub use order_repo::{OrderRepo, PlaceOrderError};
pub use product_repo::ProductRepo;
pub use project_repo::ProjectRepo;
pub use review_repo::ReviewRepo;
pub use tag_repo::TagRepo;
pub use user_repo::UserRepo;
