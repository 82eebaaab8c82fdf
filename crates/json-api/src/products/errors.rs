//! Product Errors

use tracing::error;

use stockroom_app::domain::products::ProductsServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: ProductsServiceError) -> ApiError {
    match error {
        ProductsServiceError::NotFound(_) => ApiError::NotFound(error.to_string()),
        ProductsServiceError::InUse(_) => ApiError::Conflict(error.to_string()),
        ProductsServiceError::AlreadyExists => {
            ApiError::Conflict("Product already exists".to_string())
        }
        ProductsServiceError::InvalidReference
        | ProductsServiceError::MissingRequiredData
        | ProductsServiceError::InvalidData => {
            ApiError::BadRequest("Invalid product payload".to_string())
        }
        ProductsServiceError::Sql(source) => {
            error!("product storage failure: {source}");

            ApiError::Internal
        }
    }
}
