//! Error Types

use thiserror::Error;

/// Result type alias for provider operations
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Provider error types
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Provider returned an error response
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider unavailable or not responding
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Configuration error (missing credential, bad endpoint, ...)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other/unknown error
    #[error("{0}")]
    Other(String),
}

impl ProviderError {
    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            ProviderError::Provider(msg) => {
                format!("The analysis service encountered an error: {}", msg)
            }
            ProviderError::ProviderUnavailable(_) => {
                "The analysis service is currently unavailable. Please try again.".into()
            }
            ProviderError::Config(_) => {
                "The analysis service is not configured. Please check your credentials.".into()
            }
            _ => "An unexpected error occurred.".into(),
        }
    }
}

impl From<anyhow::Error> for ProviderError {
    fn from(err: anyhow::Error) -> Self {
        ProviderError::Other(err.to_string())
    }
}
