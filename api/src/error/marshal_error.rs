//! Parameter marshaling errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::endpoint::ParamEncoding;

/// Errors while encoding call parameters.
///
/// All of these are raised before any network traffic.
#[derive(Debug, Error)]
pub enum MarshalError {
    /// A parameter value has no representation in the encoding.
    #[error("Parameter '{name}' ({kind}) cannot be sent as {encoding}")]
    Unsupported {
        name: String,
        kind: &'static str,
        encoding: ParamEncoding,
    },

    /// JSON has no representation for NaN or infinity.
    #[error("Parameter '{name}' is not a finite number")]
    NonFiniteNumber { name: String },

    /// A bare JSON array body needs exactly one list parameter.
    #[error("JSON array body needs exactly one list parameter, got {count}")]
    ArrayBody { count: usize },

    /// Upload ids must pair up with uploaded blobs.
    #[error("{uids} ids supplied for {blobs} uploads")]
    LengthMismatch { blobs: usize, uids: usize },

    /// A blob's content type is not a valid MIME type.
    #[error("Parameter '{name}' has invalid content type '{content_type}'")]
    InvalidContentType { name: String, content_type: String },

    /// An upload could not be read from disk.
    #[error("Failed to read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MarshalError {
    /// Creates an unsupported value error.
    pub fn unsupported(name: &str, kind: &'static str, encoding: ParamEncoding) -> Self {
        Self::Unsupported {
            name: name.to_string(),
            kind,
            encoding,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_display() {
        let err = MarshalError::unsupported("texts", "list", ParamEncoding::Query);
        assert_eq!(err.to_string(), "Parameter 'texts' (list) cannot be sent as query");
    }

    #[test]
    fn test_length_mismatch_display() {
        let err = MarshalError::LengthMismatch { blobs: 2, uids: 3 };
        assert_eq!(err.to_string(), "3 ids supplied for 2 uploads");
    }

    #[test]
    fn test_invalid_content_type_display() {
        let err = MarshalError::InvalidContentType {
            name: "data".to_string(),
            content_type: "not a mime".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Parameter 'data' has invalid content type 'not a mime'"
        );
    }
}
