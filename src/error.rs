//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] is the shared error-response helper for the handlers. Each
//! variant maps to one HTTP status and one fixed client-facing message;
//! underlying causes stay in the server logs.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::persistence::StoreError;

/// JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// { "error": "Missing category parameter" }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

/// Handler-level failure.
///
/// | Variant                 | HTTP Status               |
/// |-------------------------|---------------------------|
/// | `MissingCategory`       | 400 Bad Request           |
/// | `NotFound`              | 404 Not Found             |
/// | `MethodNotAllowed`      | 405 Method Not Allowed    |
/// | `CategoriesUnavailable` | 500 Internal Server Error |
/// | `LabTestsUnavailable`   | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// `category` query parameter absent or empty.
    #[error("Missing category parameter")]
    MissingCategory,

    /// Category listing failed in the store.
    #[error("Server error")]
    CategoriesUnavailable(#[source] StoreError),

    /// Lab test listing failed in the store.
    #[error("Failed to get lab tests")]
    LabTestsUnavailable {
        /// Category that was being queried.
        category: String,
        /// Underlying store failure.
        #[source]
        source: StoreError,
    },

    /// No route matched the request path.
    #[error("Not found")]
    NotFound,

    /// The path exists but not for the request method.
    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl ApiError {
    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingCategory => StatusCode::BAD_REQUEST,
            Self::CategoriesUnavailable(_) | Self::LabTestsUnavailable { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
