pub mod blog_post;
pub mod category;
pub mod contact;
pub mod order;
pub mod product;
pub mod project;
pub mod review;
pub mod tag;
pub mod user;
