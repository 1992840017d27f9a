//! Products

mod errors;
mod handlers;
pub(crate) mod reviews;

pub(crate) use handlers::*;
