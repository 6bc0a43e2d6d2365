use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    /// The multipart body could not be parsed at all.
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// File or framework absent after parsing.
    #[error("{0}")]
    MissingInput(String),

    #[error("File size exceeds maximum allowed size of {limit} bytes")]
    PayloadTooLarge { limit: usize },

    /// The generation API answered with a structured error; `body` is relayed verbatim.
    #[error("Generation API error (status {status})")]
    ExternalCapability { status: u16, body: Value },

    #[error("{0}")]
    Unknown(String),
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Api { status, body } => AppError::ExternalCapability { status, body },
            other => AppError::Unknown(other.to_string()),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Unknown(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::MalformedRequest(msg) => {
                tracing::warn!("Rejecting malformed upload: {msg}");
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "message": "Bad Request", "error": msg }),
                )
            }
            AppError::MissingInput(msg) => {
                tracing::warn!("Rejecting upload: {msg}");
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "message": "Bad Request", "error": msg }),
                )
            }
            AppError::PayloadTooLarge { .. } => {
                tracing::warn!("Rejecting upload: {self}");
                (
                    StatusCode::PAYLOAD_TOO_LARGE,
                    json!({ "message": "Payload Too Large", "error": self.to_string() }),
                )
            }
            AppError::ExternalCapability { status, body } => {
                tracing::error!("OpenAI API Error (status {status}): {body}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "OpenAI API Error", "details": body }),
                )
            }
            AppError::Unknown(msg) => {
                tracing::error!("Error processing request: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Internal Server Error", "error": msg }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
