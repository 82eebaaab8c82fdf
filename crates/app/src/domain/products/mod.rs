//! Products

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod seed;
pub mod service;

pub use errors::ProductsServiceError;
pub use service::*;
