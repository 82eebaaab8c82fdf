//! Order Errors

use tracing::error;

use stockroom_app::domain::orders::OrdersServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: OrdersServiceError) -> ApiError {
    match error {
        OrdersServiceError::OrderNotFound(_) | OrdersServiceError::ProductNotFound(_) => {
            ApiError::NotFound(error.to_string())
        }
        OrdersServiceError::InsufficientStock { .. } => ApiError::BadRequest(error.to_string()),
        OrdersServiceError::AlreadyExists => ApiError::Conflict("Order already exists".to_string()),
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => {
            ApiError::BadRequest("Invalid order payload".to_string())
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage failure: {source}");

            ApiError::Internal
        }
    }
}
