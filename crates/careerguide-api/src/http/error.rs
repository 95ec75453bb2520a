//! Application error type mapping to HTTP status codes and envelope format.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use careerguide_types::error::{ChatError, RepositoryError};

use crate::http::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Session/message service errors.
    Chat(ChatError),
    /// Storage errors outside the chat services (user upsert).
    Repository(RepositoryError),
    /// No resolvable caller identity.
    Unauthorized(String),
    /// Request body is not JSON, or could not be read.
    BadRequest(String),
    /// Request body is JSON but does not fit the procedure's input.
    InvalidField { field: String, message: String },
    /// Unknown procedure or missing resource.
    NotFound(String),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        AppError::Repository(e)
    }
}

type ErrorParts = (StatusCode, &'static str, String, Option<serde_json::Value>);

impl AppError {
    fn validation(field: &str, message: &str) -> ErrorParts {
        let mut field_errors = serde_json::Map::new();
        field_errors.insert(field.to_string(), json!([message]));
        (
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            format!("{field}: {message}"),
            Some(json!({ "fieldErrors": field_errors })),
        )
    }

    fn internal(err: &dyn std::fmt::Display) -> ErrorParts {
        tracing::error!(error = %err, "Request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "Internal server error".to_string(),
            None,
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details): ErrorParts = match &self {
            AppError::Chat(ChatError::SessionNotFound) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "Session not found".to_string(),
                None,
            ),
            AppError::Chat(ChatError::Validation { field, message }) => {
                Self::validation(field, message)
            }
            AppError::InvalidField { field, message } => Self::validation(field, message),
            AppError::Chat(ChatError::Repository(e)) => Self::internal(e),
            AppError::Repository(e) => Self::internal(e),
            AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone(), None)
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone(), None)
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone(), None),
        };

        (status, Json(ApiResponse::error(code, &message, details))).into_response()
    }
}
