//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::{orders::models::OrderId, products::models::ProductId};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order already exists")]
    AlreadyExists,

    #[error("Order not found with id: {0}")]
    OrderNotFound(OrderId),

    #[error("Product not found with id: {0}")]
    ProductNotFound(ProductId),

    #[error("Not enough stock for product: {name}")]
    InsufficientStock { product: ProductId, name: String },

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl OrdersServiceError {
    /// Short, stable label used when counting rejected orders.
    #[must_use]
    pub fn rejection_reason(&self) -> &'static str {
        match self {
            Self::ProductNotFound(_) => "product_not_found",
            Self::InsufficientStock { .. } => "insufficient_stock",
            Self::AlreadyExists
            | Self::OrderNotFound(_)
            | Self::InvalidReference
            | Self::MissingRequiredData
            | Self::InvalidData => "invalid",
            Self::Sql(_) => "storage",
        }
    }
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
