//! Top-level API error type.

use super::{ConfigError, DecodeError, MarshalError, TransportError};
use thiserror::Error;

/// Top-level error type for all API operations.
///
/// Every layer's error converts into `ApiError` unchanged, so callers can
/// still match on the specific category.
///
/// ## Examples
///
/// ```rust,ignore
/// use txtai_api::ApiError;
///
/// fn handle_error(err: ApiError) {
///     match err {
///         ApiError::Transport(e) => eprintln!("Request failed: {e}"),
///         ApiError::Marshal(e) => eprintln!("Bad parameters: {e}"),
///         ApiError::Decode(e) => eprintln!("Unexpected response: {e}"),
///         ApiError::Config(e) => eprintln!("Configuration error: {e}"),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network failures and non-2xx HTTP responses.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Parameters that cannot be represented in the endpoint's encoding.
    #[error(transparent)]
    Marshal(#[from] MarshalError),

    /// Response bodies that do not match the declared shape.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Invalid client or endpoint configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ApiError {
    /// Returns `true` if the request reached the network and failed there.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns the HTTP status code of a failed response, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Transport(e) => e.status_code(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(TransportError::Request(err))
    }
}
