pub mod admin;
pub mod auth;
pub mod blog;
pub mod categories;
pub mod contacts;
pub mod orders;
pub mod products;
pub mod projects;
pub mod reviews;
pub mod tags;
