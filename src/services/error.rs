use thiserror::Error;

use crate::application::error::ApplicationError;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Relay provider error: {0}")]
    ProviderError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<RelayError> for ApplicationError {
    fn from(error: RelayError) -> Self {
        match error {
            RelayError::NotFound(msg) => {
                ApplicationError::NotFound(format!("Relay error: {}", msg))
            }
            RelayError::Unauthorized(msg)
            | RelayError::NetworkError(msg)
            | RelayError::InvalidCredentials(msg)
            | RelayError::ProviderError(msg)
            | RelayError::InternalError(msg) => {
                ApplicationError::InternalError(format!("Relay error: {}", msg))
            }
        }
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(error: reqwest::Error) -> Self {
        // reqwest embeds the request URL in its messages, which carries the bot token.
        let error = error.without_url();
        if error.is_timeout() {
            RelayError::NetworkError("Request timeout".to_string())
        } else if error.is_connect() {
            RelayError::NetworkError(format!("Connection failed: {}", error))
        } else if let Some(status) = error.status() {
            match status.as_u16() {
                404 => RelayError::NotFound(error.to_string()),
                401 | 403 => RelayError::Unauthorized(error.to_string()),
                _ => RelayError::ProviderError(error.to_string()),
            }
        } else {
            RelayError::InternalError(error.to_string())
        }
    }
}
