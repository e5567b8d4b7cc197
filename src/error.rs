// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::message::ErrorResponse;

pub const INVALID_INPUT_MESSAGE: &str = "Message parameter is missing or invalid.";
pub const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Message parameter is missing or invalid.")]
    InvalidInput,

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The body sent to the caller. Internal causes never leave the process.
    pub fn body(&self) -> ErrorResponse {
        match self {
            AppError::InvalidInput => ErrorResponse::new(INVALID_INPUT_MESSAGE),
            AppError::Internal(_) => ErrorResponse::new(INTERNAL_ERROR_MESSAGE),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::InvalidInput => {
                tracing::error!("Validation error: {INVALID_INPUT_MESSAGE}");
            }
            AppError::Internal(err) => {
                tracing::error!("An unexpected error occurred: {err:?}");
            }
        }

        (self.status(), Json(self.body())).into_response()
    }
}

/// Generic 500 used where no `AppError` is available, e.g. after a panic.
pub fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(INTERNAL_ERROR_MESSAGE)),
    )
        .into_response()
}
