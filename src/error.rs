//! Error types for the cadastro server.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use crate::domain::ValidationError;
use thiserror::Error;

/// Errors that can occur when interacting with the Obras API.
#[derive(Error, Debug)]
pub enum ObrasApiError {
    /// The backend answered with an error body carrying a `detail` message
    #[error("API error (status {status}): {detail}")]
    Rejected { status: u16, detail: String },

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Transport failure, or an error response without a `detail` message
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Form input rejected before any request was sent
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
}

impl ObrasApiError {
    /// Message suitable for showing to the person filling the form.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { detail, .. } | Self::NotFound(detail) => detail.clone(),
            Self::Validation(e) => e.user_message().to_string(),
            Self::Connection(_) | Self::Timeout | Self::JsonError(_) => {
                "Erro de conexão com o servidor.".to_string()
            }
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with ObrasApiError
pub type ObrasApiResult<T> = Result<T, ObrasApiError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
