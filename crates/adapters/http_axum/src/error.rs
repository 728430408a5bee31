//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use storefront_domain::error::{StorefrontError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`StorefrontError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(pub StorefrontError);

impl From<StorefrontError> for ApiError {
    fn from(err: StorefrontError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            StorefrontError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            StorefrontError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            StorefrontError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "authentication required".to_string())
            }
            StorefrontError::StoreUnavailable(err) => {
                tracing::error!(error = %err, detail = ?err, "store unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "service temporarily unavailable".to_string(),
                )
            }
            StorefrontError::Upstream(err) => {
                tracing::error!(error = %err, detail = ?err, "upstream failure");
                (StatusCode::BAD_GATEWAY, "upstream failure".to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
