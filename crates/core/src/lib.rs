//! Business rules for the FurniCraft storefront.
//!
//! Everything here is pure: no database, no HTTP. The `db` and `api` crates
//! call these functions on the write path before persisting.

pub mod blog;
pub mod catalog;
pub mod contact;
pub mod error;
pub mod lifecycle;
pub mod lockout;
pub mod order;
pub mod pricing;
pub mod rating;
pub mod review;
pub mod roles;
pub mod search;
pub mod slug;
pub mod types;
