use core::result::Result as CoreResult;

use thiserror::Error;

/// Result type for store and API operations.
pub type Result<T> = CoreResult<T, Error>;

/// Errors surfaced by the API client and the paginator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// The server responded with a non-success status.
    #[error("API Error: {status} - {status_text}")]
    Api { status: u16, status_text: String },

    /// The request went out but no response came back.
    #[error("Network Error: No response from server ({0})")]
    Network(String),

    /// Anything else that went wrong on the client side.
    #[error("Error: {0}")]
    Request(String),

    /// A caller passed a value the operation cannot work with.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Did the failure happen before any response arrived
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        if let Some(status) = error.status() {
            Self::Api {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            }
        } else if error.is_connect() || error.is_timeout() || error.is_request() {
            // the connection failed or closed before any response arrived
            Self::Network(error.to_string())
        } else {
            Self::Request(error.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Request(error.to_string())
    }
}
