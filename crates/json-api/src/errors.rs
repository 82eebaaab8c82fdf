//! API Errors

use std::collections::BTreeMap;

use jiff::Timestamp;
use salvo::{
    oapi::{self, Components, EndpointOutRegister, Operation, ToSchema},
    prelude::*,
};
use serde::{Deserialize, Serialize};

/// Message shown for every failure the client cannot act on.
pub(crate) const UNEXPECTED_ERROR_MESSAGE: &str =
    "An unexpected error occurred. Please try again later.";

/// Error Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorResponse {
    /// HTTP status code
    pub status: u16,

    /// Human readable description of the failure
    pub message: String,

    /// When the error was produced
    pub timestamp: String,
}

/// Field-level problems with a request body, keyed by field name.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    /// Record `message` against `field` when `failed` holds.
    pub(crate) fn check(&mut self, failed: bool, field: &str, message: &str) -> &mut Self {
        if failed {
            self.0
                .entry(field.to_string())
                .or_insert_with(|| message.to_string());
        }

        self
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }
}

/// Errors returned by API handlers.
#[derive(Debug)]
pub(crate) enum ApiError {
    /// The addressed resource does not exist.
    NotFound(String),

    /// The request is well formed but cannot be applied.
    BadRequest(String),

    /// The request clashes with existing data.
    Conflict(String),

    /// The request body failed validation.
    Validation(ValidationErrors),

    /// Anything else. Details are logged where the error is raised.
    Internal,
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Lets tests propagate `ApiError` with `?` into `TestResult`.
#[cfg(test)]
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        let status = self.status_code();

        res.status_code(status);

        let message = match self {
            Self::Validation(errors) => {
                res.render(Json(errors));

                return;
            }
            Self::NotFound(message) | Self::BadRequest(message) | Self::Conflict(message) => {
                message
            }
            Self::Internal => UNEXPECTED_ERROR_MESSAGE.to_string(),
        };

        res.render(Json(ErrorResponse {
            status: status.as_u16(),
            message,
            timestamp: Timestamp::now().to_string(),
        }));
    }
}

impl EndpointOutRegister for ApiError {
    fn register(components: &mut Components, operation: &mut Operation) {
        for (status, description) in [
            (StatusCode::BAD_REQUEST, "Bad Request"),
            (StatusCode::NOT_FOUND, "Not Found"),
            (StatusCode::CONFLICT, "Conflict"),
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        ] {
            operation.responses.insert(
                status.as_str(),
                oapi::Response::new(description)
                    .add_content("application/json", ErrorResponse::to_schema(components)),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use super::*;

    #[handler]
    async fn not_found() -> Result<(), ApiError> {
        Err(ApiError::NotFound("Product not found with id: 999".to_string()))
    }

    #[handler]
    async fn internal() -> Result<(), ApiError> {
        Err(ApiError::Internal)
    }

    #[handler]
    async fn invalid() -> Result<(), ApiError> {
        let mut errors = ValidationErrors::default();

        errors
            .check(true, "name", "Product name is required")
            .check(false, "price", "Price must be zero or greater");

        Err(ApiError::Validation(errors))
    }

    fn service() -> Service {
        Service::new(
            Router::new()
                .push(Router::with_path("not-found").get(not_found))
                .push(Router::with_path("internal").get(internal))
                .push(Router::with_path("invalid").get(invalid)),
        )
    }

    #[tokio::test]
    async fn not_found_renders_status_message_and_timestamp() -> TestResult {
        let mut res = TestClient::get("http://example.com/not-found")
            .send(&service())
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(body.status, 404);
        assert_eq!(body.message, "Product not found with id: 999");
        assert!(body.timestamp.parse::<Timestamp>().is_ok());

        Ok(())
    }

    #[tokio::test]
    async fn internal_errors_hide_details() -> TestResult {
        let mut res = TestClient::get("http://example.com/internal")
            .send(&service())
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(body.message, UNEXPECTED_ERROR_MESSAGE);

        Ok(())
    }

    #[tokio::test]
    async fn validation_errors_render_field_map() -> TestResult {
        let mut res = TestClient::get("http://example.com/invalid")
            .send(&service())
            .await;

        let body: ValidationErrors = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.get("name"), Some("Product name is required"));
        assert_eq!(body.get("price"), None);

        Ok(())
    }
}
