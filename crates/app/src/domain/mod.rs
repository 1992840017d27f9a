//! Storefront Domain Concerns

pub mod carts;
pub mod collections;
pub mod customers;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod users;
