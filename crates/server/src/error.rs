// crates/server/src/error.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tokencost_core::CalcError;

/// Message returned when a request carries nothing to price.
pub const NO_INPUT_MESSAGE: &str = "Please enter a prompt or upload files";

/// JSON body for failed requests.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// API error types that map to HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Upload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Server error: {0}")]
    Internal(String),
}

impl From<CalcError> for ApiError {
    fn from(err: CalcError) -> Self {
        match err {
            CalcError::NoInput => ApiError::Validation(NO_INPUT_MESSAGE.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(msg) => {
                tracing::warn!(message = %msg, "Rejected calculation request");
                StatusCode::BAD_REQUEST
            }
            ApiError::PayloadTooLarge(msg) => {
                tracing::warn!(message = %msg, "Request body over upload limit");
                StatusCode::PAYLOAD_TOO_LARGE
            }
            ApiError::Internal(msg) => {
                tracing::error!(message = %msg, "Error in calculate");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
