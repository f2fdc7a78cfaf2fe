// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Machine-readable error code carried in every error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/app/generated/")
)]
pub enum ErrorCode {
    InvalidInput,
    InvalidCredentials,
    AccountInactive,
    InvalidToken,
    InternalServerError,
}

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),

    /// Unknown credential and wrong password share this variant.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account is inactive")]
    AccountInactive,

    #[error("Invalid or expired token")]
    InvalidToken,

    /// Server-side data fault, e.g. a user pointing at a missing role.
    #[error("Data integrity error: {0}")]
    Integrity(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub const INTERNAL_MESSAGE: &'static str = "An unexpected error occurred";

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::AccountInactive | AppError::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Integrity(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::InvalidInput(_) => ErrorCode::InvalidInput,
            AppError::InvalidCredentials => ErrorCode::InvalidCredentials,
            AppError::AccountInactive => ErrorCode::AccountInactive,
            AppError::InvalidToken => ErrorCode::InvalidToken,
            AppError::Integrity(_) | AppError::Internal(_) => ErrorCode::InternalServerError,
        }
    }
}

/// JSON error response body
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/app/generated/")
)]
pub struct ErrorResponse {
    pub status: String,
    pub code: ErrorCode,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::Integrity(detail) => {
                tracing::error!(error = %detail, "Data integrity error");
                AppError::INTERNAL_MESSAGE.to_string()
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                AppError::INTERNAL_MESSAGE.to_string()
            }
            other => other.to_string(),
        };

        let body = ErrorResponse {
            status: "error".to_string(),
            code: self.code(),
            message,
        };

        (self.status(), Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
