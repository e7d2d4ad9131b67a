//! HTTP client and network errors.

use thiserror::Error;

/// Errors from the HTTP transport.
///
/// Any response outside `200..=299` is a failure; there is no retry.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed due to network or protocol error.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned a non-success HTTP status code.
    #[error("HTTP {status}: {message}")]
    HttpStatus {
        /// The HTTP status code returned.
        status: u16,
        /// The response body, verbatim.
        message: String,
    },
}

impl TransportError {
    /// Returns the HTTP status code if the server answered.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
        }
    }

    /// Returns `true` if the request timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Request(e) if e.is_timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let err = TransportError::HttpStatus {
            status: 500,
            message: "internal error".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("500"));
        assert!(display.contains("internal error"));
    }

    #[test]
    fn test_status_code_extraction() {
        let err = TransportError::HttpStatus {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert_eq!(err.status_code(), Some(404));
        assert!(!err.is_timeout());
    }
}
