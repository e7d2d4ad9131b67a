//! Client and endpoint configuration errors.

use thiserror::Error;

use crate::endpoint_id::EndpointIdError;
use crate::method::RestMethod;

/// Errors in client or endpoint configuration.
///
/// These occur while building a transport or binder, and indicate invalid
/// settings or a malformed endpoint table.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A required configuration field is missing.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Endpoint name validation failed.
    #[error("Invalid endpoint ID: {0}")]
    InvalidEndpointId(#[from] EndpointIdError),

    /// Duplicate endpoint name detected.
    #[error("Duplicate endpoint ID: {id}")]
    DuplicateEndpoint {
        /// The duplicate endpoint name.
        id: String,
    },

    /// A method without a body was declared with a body encoding.
    #[error("Endpoint {id}: {method} requests must use query encoding")]
    EncodingMismatch { id: String, method: RestMethod },

    /// The endpoint is not part of the binder's table.
    #[error("Unknown endpoint: {id}")]
    UnknownEndpoint { id: String },

    /// The bearer token is not a valid header value.
    #[error("API token contains characters not allowed in an HTTP header")]
    InvalidToken,

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl ConfigError {
    /// Creates a missing field error.
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Creates an unknown endpoint error.
    pub fn unknown_endpoint(id: impl Into<String>) -> Self {
        Self::UnknownEndpoint { id: id.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field() {
        let err = ConfigError::missing_field("url");
        assert_eq!(err.to_string(), "Missing required field: url");
    }

    #[test]
    fn test_invalid_url() {
        let url_err = url::Url::parse("not-a-url").unwrap_err();
        let err = ConfigError::InvalidUrl(url_err);
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_duplicate_endpoint() {
        let err = ConfigError::DuplicateEndpoint {
            id: "search".to_string(),
        };
        assert_eq!(err.to_string(), "Duplicate endpoint ID: search");
    }

    #[test]
    fn test_encoding_mismatch() {
        let err = ConfigError::EncodingMismatch {
            id: "count".to_string(),
            method: RestMethod::Get,
        };
        assert_eq!(
            err.to_string(),
            "Endpoint count: GET requests must use query encoding"
        );
    }

    #[test]
    fn test_invalid_token_does_not_leak() {
        let err = ConfigError::InvalidToken;
        assert!(!err.to_string().contains("Bearer"));
    }
}
