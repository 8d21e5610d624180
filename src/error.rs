//! Application error taxonomy and HTTP mapping.
//!
//! Every fallible path funnels into [`AppError`]; the [`IntoResponse`] impl
//! is the single place errors become HTTP responses, so status codes and
//! body shape stay consistent across handlers. Internal details (sqlx
//! messages, constraint names) are logged here and never serialized into
//! response bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::utils::base62::CodecError;
use crate::utils::url_normalizer::UrlNormalizationError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Unknown short code. User-facing 404.
    #[error("short code '{code}' not found")]
    NotFound { code: String },

    /// The URL already has a row; duplicates are rejected by policy.
    #[error("URL has already been shortened")]
    DuplicateUrl { url: String },

    /// Malformed request input (bad URL, bad pagination). User-facing 400.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Short-code uniqueness violation during finalize. The service retries
    /// once; if this variant escapes, the retry also collided, which means
    /// corrupted data or a non-monotonic id source.
    #[error("short code '{code}' already taken")]
    CodeTaken { code: String },

    /// Decode failure on a code that should have been well-formed.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Database connectivity or transactional failure.
    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),
}

impl AppError {
    pub fn not_found(code: impl Into<String>) -> Self {
        Self::NotFound { code: code.into() }
    }

    pub fn duplicate_url(url: impl Into<String>) -> Self {
        Self::DuplicateUrl { url: url.into() }
    }

    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    pub fn code_taken(code: impl Into<String>) -> Self {
        Self::CodeTaken { code: code.into() }
    }
}

impl From<UrlNormalizationError> for AppError {
    fn from(e: UrlNormalizationError) -> Self {
        Self::InvalidInput {
            reason: e.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        Self::InvalidInput {
            reason: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::NotFound { code } => (
                StatusCode::NOT_FOUND,
                "not_found",
                "Short code not found".to_string(),
                json!({ "code": code }),
            ),
            AppError::DuplicateUrl { url } => (
                StatusCode::BAD_REQUEST,
                "duplicate_url",
                "URL has already been shortened".to_string(),
                json!({ "url": url }),
            ),
            AppError::InvalidInput { reason } => {
                (StatusCode::BAD_REQUEST, "invalid_input", reason, json!({}))
            }
            AppError::CodeTaken { ref code } => {
                tracing::error!(code = %code, "Short code collision survived the retry");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error".to_string(),
                    json!({}),
                )
            }
            AppError::Codec(ref e) => {
                tracing::error!(error = %e, "Codec failure on a stored code");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error".to_string(),
                    json!({}),
                )
            }
            AppError::Store(ref e) => {
                tracing::error!(error = %e, "Store operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Database error".to_string(),
                    json!({}),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}
