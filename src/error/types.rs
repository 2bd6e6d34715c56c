// src/error/types.rs
use crate::domain::{DomainError, ValidationError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// No session token for an operation that needs one
    #[error("Not signed in")]
    Unauthenticated,

    #[error("Resource not found")]
    NotFound,

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Network failure or non-2xx response. `message` is the server's
    /// message when it sent one.
    #[error("Request failed: {message}")]
    RequestFailed { status: Option<u16>, message: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl AppError {
    pub fn request_failed(status: Option<u16>, message: impl Into<String>) -> Self {
        AppError::RequestFailed {
            status,
            message: message.into(),
        }
    }

    /// Errors that must send the user back to the public entry view
    pub fn requires_sign_in(&self) -> bool {
        matches!(
            self,
            AppError::Unauthenticated | AppError::RequestFailed { status: Some(401), .. }
        )
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::RequestFailed {
            status: err.status().map(|s| s.as_u16()),
            message: format!("Request failed: {}", err),
        }
    }
}

impl From<chrono::ParseError> for AppError {
    fn from(err: chrono::ParseError) -> Self {
        AppError::Other(format!("Date parse error: {}", err))
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Pool(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_failed_display_uses_server_message() {
        let err = AppError::request_failed(Some(409), "Profile already exists");
        assert_eq!(err.to_string(), "Request failed: Profile already exists");
    }

    #[test]
    fn test_requires_sign_in() {
        assert!(AppError::Unauthenticated.requires_sign_in());
        assert!(AppError::request_failed(Some(401), "expired").requires_sign_in());
        assert!(!AppError::request_failed(Some(500), "boom").requires_sign_in());
        assert!(!AppError::NotFound.requires_sign_in());
    }
}
