use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use autoux_core::error::CoreError;
use autoux_db::DbError;
use autoux_llm::LlmError;

/// Application-level error type for HTTP handlers.
///
/// Wraps domain errors from `autoux-core` and upstream errors from the two
/// external collaborators, and adds HTTP-specific variants. Implements
/// [`IntoResponse`] to produce consistent `{ "error", "code" }` JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `autoux-core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An upstream hosted-database failure.
    #[error("Database error: {0}")]
    Db(#[from] DbError),

    /// An upstream LLM provider failure.
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A collaborator this endpoint needs was never configured.
    #[error("Service unavailable: {0}")]
    Unavailable(&'static str),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::InvalidPlan(msg) => {
                    tracing::warn!(error = %msg, "Rejected query plan");
                    (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        "INVALID_PLAN",
                        msg.clone(),
                    )
                }
                CoreError::UnsupportedPage(page) => (
                    StatusCode::BAD_REQUEST,
                    "UNSUPPORTED_PAGE",
                    format!("unsupported page type: {page}"),
                ),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Upstream collaborators ---
            AppError::Db(err) => {
                tracing::error!(error = %err, "Hosted database call failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_DATABASE",
                    "The hosted database is unavailable".to_string(),
                )
            }
            AppError::Llm(err) => {
                tracing::error!(error = %err, "LLM call failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_LLM",
                    "The language model provider is unavailable".to_string(),
                )
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Unavailable(what) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "NOT_CONFIGURED",
                (*what).to_string(),
            ),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
