//! Domain error taxonomy.
//!
//! Every workflow returns [`CoreResult`]. Expected business conditions are
//! values of [`CoreError`], never panics.

use serde::Serialize;

/// Result alias used by every workflow operation.
pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        /// Optional field-level diagnostics.
        details: Option<serde_json::Value>,
    },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    #[error("External service error: {0}")]
    ExternalService(String),
}

/// The closed set of failure kinds a caller maps to its own status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    ValidationError,
    Unauthorized,
    Forbidden,
    BusinessRuleViolation,
    ExternalServiceError,
}

impl ErrorKind {
    /// Wire code for this kind.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::AlreadyExists => "ALREADY_EXISTS",
            ErrorKind::ValidationError => "VALIDATION_ERROR",
            ErrorKind::Unauthorized => "UNAUTHORIZED",
            ErrorKind::Forbidden => "FORBIDDEN",
            ErrorKind::BusinessRuleViolation => "BUSINESS_RULE_VIOLATION",
            ErrorKind::ExternalServiceError => "EXTERNAL_SERVICE_ERROR",
        }
    }
}

impl CoreError {
    /// Validation failure without structured details.
    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation {
            message: message.into(),
            details: None,
        }
    }

    /// Validation failure pointing at a specific input field.
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        CoreError::Validation {
            message: message.into(),
            details: Some(serde_json::json!({ "field": field.into() })),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::NotFound(_) => ErrorKind::NotFound,
            CoreError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            CoreError::Validation { .. } => ErrorKind::ValidationError,
            CoreError::Unauthorized(_) => ErrorKind::Unauthorized,
            CoreError::Forbidden(_) => ErrorKind::Forbidden,
            CoreError::BusinessRule(_) => ErrorKind::BusinessRuleViolation,
            CoreError::ExternalService(_) => ErrorKind::ExternalServiceError,
        }
    }

    /// Human-readable message without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            CoreError::NotFound(msg)
            | CoreError::AlreadyExists(msg)
            | CoreError::Unauthorized(msg)
            | CoreError::Forbidden(msg)
            | CoreError::BusinessRule(msg)
            | CoreError::ExternalService(msg) => msg,
            CoreError::Validation { message, .. } => message,
        }
    }

    pub fn details(&self) -> Option<&serde_json::Value> {
        match self {
            CoreError::Validation { details, .. } => details.as_ref(),
            _ => None,
        }
    }
}
