// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use crate::services::verifier::AuthError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Field-scoped validation failure; rendered as 422 with per-field details.
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        details: BTreeMap<String, String>,
    },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<BTreeMap<String, String>>,
}

impl AppError {
    /// Status code and stable error category for this error.
    pub fn status_and_category(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Auth(AuthError::Misconfigured(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "auth_misconfigured")
            }
            AppError::Auth(AuthError::MissingCredential) => {
                (StatusCode::UNAUTHORIZED, "unauthorized")
            }
            AppError::Auth(AuthError::Expired) => (StatusCode::UNAUTHORIZED, "token_expired"),
            AppError::Auth(AuthError::Malformed(_)) => (StatusCode::UNAUTHORIZED, "invalid_token"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Validation { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "validation_failed"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = self.status_and_category();

        let (message, details) = match self {
            AppError::Auth(err) => {
                if let AuthError::Misconfigured(reason) = &err {
                    tracing::error!(reason = %reason, "Token verifier misconfigured");
                }
                (err.user_message().to_string(), None)
            }
            AppError::NotFound(msg) | AppError::BadRequest(msg) | AppError::Conflict(msg) => {
                (msg, None)
            }
            AppError::Validation { message, details } => (message, Some(details)),
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                ("Something went wrong, please try again".to_string(), None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                ("Something went wrong, please try again".to_string(), None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
