//! Error types for chatbot operations

use thiserror::Error;

/// Broad classification of a [`ChatError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Connection refused, DNS failure, timeout
    Network,
    /// The endpoint answered with a non-success status
    Status,
    /// The body could not be decoded into the expected schema
    MalformedResponse,
    /// Invalid configuration
    Config,
}

/// Errors raised while talking to the analysis and chat services
#[derive(Debug, Error)]
pub enum ChatError {
    /// Network or HTTP transport error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Endpoint returned a non-success status code
    #[error("{endpoint} returned HTTP {status}")]
    Status {
        endpoint: String,
        status: u16,
    },

    /// Response body is missing a required field or is not valid JSON
    #[error("Malformed response from {endpoint}: {reason}")]
    MalformedResponse {
        endpoint: String,
        reason: String,
    },

    /// Invalid endpoint URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ChatError {
    /// Create a malformed-response error for the given endpoint
    pub fn malformed(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) => ErrorKind::Network,
            Self::Status { .. } => ErrorKind::Status,
            Self::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            Self::InvalidUrl(_) | Self::Config(_) => ErrorKind::Config,
        }
    }
}

/// Result type alias for chatbot operations
pub type Result<T> = std::result::Result<T, ChatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ChatError::malformed("/api/chat", "missing `result`");
        assert_eq!(
            err.to_string(),
            "Malformed response from /api/chat: missing `result`"
        );

        let err = ChatError::Status {
            endpoint: "/api/analyze".to_string(),
            status: 502,
        };
        assert_eq!(err.to_string(), "/api/analyze returned HTTP 502");
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(
            ChatError::malformed("/api/chat", "x").kind(),
            ErrorKind::MalformedResponse
        );
        assert_eq!(ChatError::Config("bad".into()).kind(), ErrorKind::Config);

        let parse_err = url::Url::parse("not a url").unwrap_err();
        let err: ChatError = parse_err.into();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}
