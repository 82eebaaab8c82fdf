//! Orders

pub mod errors;
pub mod models;
mod repositories;
mod reservation;
pub mod service;

pub use errors::OrdersServiceError;
pub use service::*;
