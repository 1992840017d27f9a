//! Authentication and authorization

mod errors;
mod models;
pub mod policy;
mod repository;
mod service;
mod token;

pub use errors::*;
pub use models::*;
pub use repository::PgAuthRepository;
pub use service::*;
pub use token::*;
