use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::CompletionError;

pub const INVALID_API_KEY_MESSAGE: &str = "Invalid API key. Please check your Gemini API key.";
pub const QUOTA_EXCEEDED_MESSAGE: &str = "API quota exceeded. Please try again later.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant renders as `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    UnprocessableEntity(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Maps a completion failure onto the status and message shown to the caller.
///
/// The backend status decides first: 401/403 is a credential problem and 429
/// is a quota problem. Only other statuses fall back to the body, where
/// `API_KEY` means a credential problem and "quota" means a quota problem.
/// Anything else is a generic analysis failure.
pub fn classify_completion_error(error: &CompletionError) -> (StatusCode, String) {
    match error {
        CompletionError::Backend { status, message } => match status {
            401 | 403 => invalid_api_key(),
            429 => quota_exceeded(),
            _ if message.contains("API_KEY") => invalid_api_key(),
            _ if message.to_lowercase().contains("quota") => quota_exceeded(),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Analysis failed: API request failed: {status}"),
            ),
        },
        other => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Analysis failed: {other}"),
        ),
    }
}

fn invalid_api_key() -> (StatusCode, String) {
    (StatusCode::UNAUTHORIZED, INVALID_API_KEY_MESSAGE.to_string())
}

fn quota_exceeded() -> (StatusCode, String) {
    (
        StatusCode::TOO_MANY_REQUESTS,
        QUOTA_EXCEEDED_MESSAGE.to_string(),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            AppError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg.clone()),
            AppError::Completion(e) => {
                tracing::error!("Completion error: {e}");
                classify_completion_error(e)
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
