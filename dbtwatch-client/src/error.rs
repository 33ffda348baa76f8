//! Error types for the dbt Cloud client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the dbt Cloud API
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_)) || matches!(self, Self::ApiError { status: 404, .. })
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 400 && *status < 500)
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }

    /// Check if retrying the request could plausibly succeed.
    ///
    /// Covers request timeouts, connection failures, throttling and server
    /// errors. Everything else (bad credentials, missing resources,
    /// malformed payloads) is permanent.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RequestFailed(e) => e.is_timeout() || e.is_connect(),
            Self::ApiError { status, .. } => *status == 429 || *status >= 500,
            Self::ParseError(_) | Self::NotFound(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_classification() {
        assert!(ClientError::api_error(404, "gone").is_not_found());
        assert!(ClientError::api_error(404, "gone").is_client_error());
        assert!(!ClientError::api_error(404, "gone").is_server_error());

        assert!(ClientError::api_error(500, "boom").is_server_error());
        assert!(!ClientError::api_error(500, "boom").is_client_error());
    }

    #[test]
    fn test_transient_errors() {
        assert!(ClientError::api_error(500, "boom").is_transient());
        assert!(ClientError::api_error(503, "unavailable").is_transient());
        assert!(ClientError::api_error(429, "slow down").is_transient());

        assert!(!ClientError::api_error(401, "bad token").is_transient());
        assert!(!ClientError::api_error(404, "gone").is_transient());
        assert!(!ClientError::NotFound("no runs".to_string()).is_transient());
        assert!(!ClientError::ParseError("bad json".to_string()).is_transient());
    }
}
