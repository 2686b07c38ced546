/// Error types for backend calls
use thiserror::Error;

/// Errors raised while talking to the catalog or provisioning backend
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced a response
    #[error("Request failed: {0}")]
    Network(String),

    /// The backend answered with a non-success status
    #[error("{message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Message extracted from the error body, or the status line
        message: String,
    },

    /// The response body did not match the expected shape
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// The HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(String),
}

impl ApiError {
    /// Text suitable for a user-facing notification.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
