//! HTTP error response mapping.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crm_domain::error::CrmError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps request and domain failures to an HTTP response with the
/// appropriate status code.
pub enum ApiError {
    /// A use-case failed.
    Domain(CrmError),
    /// The `{id}` path segment is not a customer identifier.
    InvalidId(String),
    /// The request body is not a well-formed customer payload.
    InvalidBody(JsonRejection),
}

impl From<CrmError> for ApiError {
    fn from(err: CrmError) -> Self {
        Self::Domain(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::InvalidId(raw) => (
                StatusCode::BAD_REQUEST,
                format!("invalid customer id: {raw}"),
            ),
            Self::InvalidBody(rejection) => (rejection.status(), rejection.body_text()),
            Self::Domain(err @ CrmError::CustomerNotFound(_)) => {
                (StatusCode::NOT_FOUND, err.to_string())
            }
            Self::Domain(err @ CrmError::EmailUnavailable(_)) => {
                (StatusCode::CONFLICT, err.to_string())
            }
            Self::Domain(CrmError::Storage(err)) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
