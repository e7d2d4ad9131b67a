//! Response decoding errors.

use thiserror::Error;

use crate::response::ResponseShape;

/// Errors while decoding a successful response.
///
/// Distinct from [`TransportError`](super::TransportError): the server
/// answered 2xx but the body is not what the endpoint declares.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The body is not valid JSON or does not fit the target type.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The body is valid JSON of the wrong kind.
    #[error("Expected {expected} response, got {found}")]
    ShapeMismatch {
        expected: ResponseShape,
        found: &'static str,
    },

    /// Empty response body when content was expected.
    #[error("Empty response body")]
    EmptyBody,
}

impl DecodeError {
    /// Returns `true` if this is a parsing error.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::JsonParse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_parse_is_parse_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err = DecodeError::JsonParse(json_err);
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_shape_mismatch_display() {
        let err = DecodeError::ShapeMismatch {
            expected: ResponseShape::Ranked,
            found: "object",
        };
        assert_eq!(err.to_string(), "Expected ranked response, got object");
        assert!(!err.is_parse_error());
    }
}
