use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use reportflow_core::error::{CoreError, ErrorKind};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Every variant renders as
/// `{"error": {"type": CODE, "message": "...", "details": ...}}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from a workflow.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A request body or query failed its shape checks.
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] validator::ValidationErrors),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// HTTP status for each domain error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::AlreadyExists => StatusCode::CONFLICT,
        ErrorKind::ValidationError => StatusCode::BAD_REQUEST,
        ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::BusinessRuleViolation => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::ExternalServiceError => StatusCode::SERVICE_UNAVAILABLE,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            AppError::Core(core) => {
                let kind = core.kind();
                let message = match kind {
                    ErrorKind::ExternalServiceError => {
                        tracing::error!(error = %core, "Collaborator failure");
                        "A backing service is unavailable".to_string()
                    }
                    _ => core.message().to_string(),
                };
                (status_for(kind), kind.code(), message, core.details().cloned())
            }

            AppError::InvalidRequest(errors) => (
                StatusCode::BAD_REQUEST,
                ErrorKind::ValidationError.code(),
                "Request validation failed".to_string(),
                serde_json::to_value(errors).ok(),
            ),

            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorKind::ValidationError.code(),
                msg.clone(),
                None,
            ),

            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let mut error = json!({
            "type": code,
            "message": message,
        });
        if let Some(details) = details {
            error["details"] = details;
        }

        (status, axum::Json(json!({ "error": error }))).into_response()
    }
}
