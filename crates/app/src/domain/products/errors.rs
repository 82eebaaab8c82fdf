//! Products service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::products::models::ProductId;

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("product already exists")]
    AlreadyExists,

    #[error("Product not found with id: {0}")]
    NotFound(ProductId),

    #[error("Product is referenced by existing orders: {0}")]
    InUse(ProductId),

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl ProductsServiceError {
    /// Reclassify a foreign-key failure raised while deleting `product`.
    pub(crate) fn on_delete(self, product: ProductId) -> Self {
        match self {
            Self::InvalidReference => Self::InUse(product),
            other => other,
        }
    }
}

impl From<Error> for ProductsServiceError {
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
