//! Error taxonomy shared by every layer of the link engine.
//!
//! Each variant carries a human-readable message plus a structured
//! `details` payload, so a presentation layer can report the failure and
//! keep going. None of these errors is fatal to the process.

use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    AccessDenied { message: String, details: Value },
    #[error("{message}")]
    Expired { message: String, details: Value },
    #[error("{message}")]
    LimitExceeded { message: String, details: Value },
    #[error("{message}")]
    AlreadyExists { message: String, details: Value },
    #[error("{message}")]
    InvalidCredentials { message: String, details: Value },
    #[error("{message}")]
    CodeSpaceExhausted { message: String, details: Value },
    #[error("{message}")]
    NotAuthenticated { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn access_denied(message: impl Into<String>, details: Value) -> Self {
        Self::AccessDenied {
            message: message.into(),
            details,
        }
    }
    pub fn expired(message: impl Into<String>, details: Value) -> Self {
        Self::Expired {
            message: message.into(),
            details,
        }
    }
    pub fn limit_exceeded(message: impl Into<String>, details: Value) -> Self {
        Self::LimitExceeded {
            message: message.into(),
            details,
        }
    }
    pub fn already_exists(message: impl Into<String>, details: Value) -> Self {
        Self::AlreadyExists {
            message: message.into(),
            details,
        }
    }
    pub fn invalid_credentials(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidCredentials {
            message: message.into(),
            details,
        }
    }
    pub fn code_space_exhausted(message: impl Into<String>, details: Value) -> Self {
        Self::CodeSpaceExhausted {
            message: message.into(),
            details,
        }
    }
    pub fn not_authenticated(message: impl Into<String>, details: Value) -> Self {
        Self::NotAuthenticated {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Stable machine-readable identifier of the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::NotFound { .. } => "not_found",
            AppError::AccessDenied { .. } => "access_denied",
            AppError::Expired { .. } => "expired",
            AppError::LimitExceeded { .. } => "limit_exceeded",
            AppError::AlreadyExists { .. } => "already_exists",
            AppError::InvalidCredentials { .. } => "invalid_credentials",
            AppError::CodeSpaceExhausted { .. } => "code_space_exhausted",
            AppError::NotAuthenticated { .. } => "not_authenticated",
            AppError::Internal { .. } => "internal_error",
        }
    }

    pub fn details(&self) -> &Value {
        match self {
            AppError::Validation { details, .. }
            | AppError::NotFound { details, .. }
            | AppError::AccessDenied { details, .. }
            | AppError::Expired { details, .. }
            | AppError::LimitExceeded { details, .. }
            | AppError::AlreadyExists { details, .. }
            | AppError::InvalidCredentials { details, .. }
            | AppError::CodeSpaceExhausted { details, .. }
            | AppError::NotAuthenticated { details, .. }
            | AppError::Internal { details, .. } => details,
        }
    }
}
