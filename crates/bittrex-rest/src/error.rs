//! Error types for REST API operations

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// HTTP request failed before a response body was read
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with a non-success status and no rejection envelope
    #[error("HTTP status {status}: {body}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// Raw response body, possibly empty
        body: String,
    },

    /// Response body did not match the envelope or the expected payload
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Envelope decoded with `success: false`
    #[error("API rejected request: {0}")]
    ApiRejected(String),
}

impl RestError {
    /// True for network-level failures, including non-success HTTP statuses
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::HttpStatus { .. })
    }

    /// True when the response body could not be decoded
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }

    /// The server-reported message when the API rejected the call
    pub fn rejection_message(&self) -> Option<&str> {
        match self {
            Self::ApiRejected(message) => Some(message),
            _ => None,
        }
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
