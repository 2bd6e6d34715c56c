// src/application/error_handling.rs
//
// Error presentation
//
// ARCHITECTURE:
// - Maps internal errors → user-facing messages
// - Server messages are shown verbatim
// - Storage and serialization details are logged, never shown

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Standard error response for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// No usable session; the view must send the user to sign in
    Unauthenticated,

    /// Resource not found
    NotFound,

    /// Local form check failed; nothing was sent
    Validation,

    /// The backend rejected the request or could not be reached
    RequestFailed,

    /// Local session storage failed
    Storage,

    /// Other/unknown error
    Internal,
}

impl ErrorResponse {
    pub fn from_app_error(error: &AppError) -> Self {
        match error {
            AppError::Unauthenticated => Self::new(
                ErrorType::Unauthenticated,
                "Please log in to continue".to_string(),
                None,
            ),

            AppError::NotFound => {
                Self::new(ErrorType::NotFound, "Resource not found".to_string(), None)
            }

            AppError::Validation(validation) => Self::new(
                ErrorType::Validation,
                "Please complete all required fields".to_string(),
                Some(validation.to_string()),
            ),

            AppError::RequestFailed { status, message } => {
                let error_type = if *status == Some(401) {
                    ErrorType::Unauthenticated
                } else {
                    ErrorType::RequestFailed
                };
                Self::new(error_type, message.clone(), status.map(|s| format!("HTTP {}", s)))
            }

            AppError::Database(_) | AppError::Pool(_) | AppError::Io(_) => {
                log::error!("Session storage error: {:?}", error);
                Self::new(
                    ErrorType::Storage,
                    "Could not access saved session".to_string(),
                    None,
                )
            }

            AppError::Domain(domain_error) => Self::new(
                ErrorType::Validation,
                domain_error.to_string(),
                None,
            ),

            AppError::Serialization(_) | AppError::Config(_) | AppError::Other(_) => {
                log::error!("Internal error: {:?}", error);
                Self::new(ErrorType::Internal, error.to_string(), None)
            }
        }
    }

    fn new(error_type: ErrorType, message: String, details: Option<String>) -> Self {
        Self {
            success: false,
            error_type,
            message,
            details,
        }
    }
}
