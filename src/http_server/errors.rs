//! HTTP errors
//!
//! Failed checks are not errors; they are a 422 response with the issue
//! list. These cover requests that cannot be validated at all.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::payload::PayloadError;
use crate::schema::SchemaError;

/// Result type for form handlers
pub type HttpResult<T> = Result<T, HttpError>;

#[derive(Debug, Error)]
pub enum HttpError {
    /// No schema registered under this name
    #[error("Form not found: {0}")]
    UnknownForm(String),

    /// Body could not be read as form data
    #[error("Invalid form body: {0}")]
    InvalidBody(String),

    /// Submission keys conflict
    #[error("{0}")]
    Payload(#[from] PayloadError),

    #[error("{0}")]
    Schema(#[from] SchemaError),
}

impl HttpError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            HttpError::InvalidBody(_) | HttpError::Payload(_) => StatusCode::BAD_REQUEST,
            HttpError::UnknownForm(_) => StatusCode::NOT_FOUND,
            HttpError::Schema(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            HttpError::UnknownForm(_) => "FORM_HTTP_UNKNOWN_FORM",
            HttpError::InvalidBody(_) => "FORM_HTTP_INVALID_BODY",
            HttpError::Payload(err) => err.code(),
            HttpError::Schema(err) => err.code().code(),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: self.error_code(),
        });
        (status, body).into_response()
    }
}
