//! Application error taxonomy and its HTTP representation.
//!
//! Validation and not-found errors are ordinary, caller-correctable results.
//! Generation and storage failures are internal faults: they are logged and
//! reported to clients without their details.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload returned by the API.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Failures of the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed snapshot: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to replace snapshot file: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("Background write task failed: {0}")]
    Task(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("URL must not be empty")]
    EmptyInput,

    #[error("Invalid URL: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("Short link not found")]
    NotFound { code: String },

    #[error("Failed to generate a unique short code after {attempts} attempts")]
    GenerationExhausted { attempts: usize },

    #[error("Storage failure: {0}")]
    Storage(#[from] StorageError),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(code: impl Into<String>) -> Self {
        Self::NotFound { code: code.into() }
    }

    /// Stable machine code for this error class.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyInput | Self::InvalidUrl { .. } | Self::Validation { .. } => {
                "validation_error"
            }
            Self::NotFound { .. } => "not_found",
            Self::GenerationExhausted { .. } | Self::Storage(_) => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::EmptyInput | Self::InvalidUrl { .. } | Self::Validation { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::GenerationExhausted { .. } | Self::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// True for faults the caller cannot correct.
    pub fn is_internal(&self) -> bool {
        self.status().is_server_error()
    }

    /// Builds the client-facing error payload.
    ///
    /// Internal faults are reduced to a generic message.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (message, details) = match self {
            Self::EmptyInput => (self.to_string(), json!({})),
            Self::InvalidUrl { url, reason } => (
                "Invalid URL format".to_string(),
                json!({ "url": url, "reason": reason }),
            ),
            Self::Validation { message, details } => (message.clone(), details.clone()),
            Self::NotFound { code } => ("URL not found".to_string(), json!({ "code": code })),
            Self::GenerationExhausted { .. } | Self::Storage(_) => {
                ("Internal server error".to_string(), json!({}))
            }
        };

        ErrorInfo {
            code: self.code(),
            message,
            details,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(errors.field_errors()).unwrap_or_else(|_| json!({}));
        Self::bad_request("Request validation failed", details)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(
            "Invalid request body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_internal() {
            tracing::error!(error = %self, "Request failed with internal error");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (self.status(), Json(body)).into_response()
    }
}
