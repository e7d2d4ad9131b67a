//! Layered error types for the API crate.
//!
//! The error hierarchy follows the path of a call:
//! - [`ApiError`] - Top-level error type for all API operations
//! - [`ConfigError`] - Construction-time configuration errors
//! - [`MarshalError`] - Parameters that cannot be encoded for an endpoint
//! - [`TransportError`] - Network failures and non-2xx responses
//! - [`DecodeError`] - Response bodies that do not match the declared shape

mod api_error;
mod config_error;
mod decode_error;
mod marshal_error;
mod transport_error;

pub use api_error::ApiError;
pub use config_error::ConfigError;
pub use decode_error::DecodeError;
pub use marshal_error::MarshalError;
pub use transport_error::TransportError;
