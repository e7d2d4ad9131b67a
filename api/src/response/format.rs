//! Response format trait and implementations.
//!
//! The [`ResponseFormat`] trait defines how a successful response body is
//! turned into a typed value. txtai speaks JSON only, so the formats differ in
//! how much typing they apply: fully typed ([`JsonFormat`]), generic JSON
//! ([`OpaqueFormat`]) or none at all ([`EmptyFormat`]).

use std::future::Future;
use std::marker::PhantomData;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::DecodeError;

/// Trait for response format parsing strategies.
///
/// ## Examples
///
/// ```rust,ignore
/// use txtai_api::{JsonFormat, SearchResult};
///
/// // The format type encodes both the parsing strategy and output type
/// type SearchResponse = JsonFormat<Vec<SearchResult>>;
/// ```
pub trait ResponseFormat: Send + Sync {
    /// The output type after parsing.
    type Output: Send + Sync;

    /// Parse a response body into the output type.
    fn parse(body: Bytes) -> impl Future<Output = Result<Self::Output, DecodeError>> + Send;

    /// Returns the expected Content-Type for this format, if any.
    fn content_type() -> Option<&'static str> {
        Some("application/json")
    }
}

/// JSON response format with typed deserialization.
///
/// ## Type Parameters
///
/// - `T`: The type to deserialize the JSON into. Must implement [`DeserializeOwned`].
#[derive(Debug, Clone, Copy)]
pub struct JsonFormat<T>(PhantomData<T>);

impl<T: DeserializeOwned + Send + Sync> ResponseFormat for JsonFormat<T> {
    type Output = T;

    async fn parse(body: Bytes) -> Result<Self::Output, DecodeError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(DecodeError::EmptyBody);
        }
        serde_json::from_slice(&body).map_err(DecodeError::JsonParse)
    }
}

/// Generic JSON with no schema applied.
///
/// Used for endpoints whose output depends on server-side configuration,
/// such as segmentation and text extraction.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpaqueFormat;

impl ResponseFormat for OpaqueFormat {
    type Output = Value;

    async fn parse(body: Bytes) -> Result<Self::Output, DecodeError> {
        JsonFormat::<Value>::parse(body).await
    }
}

/// Discards the body.
///
/// Used for endpoints called only for their side effect (`add`, `index`,
/// `upsert`, ...). Whatever the server sends back on success is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyFormat;

impl ResponseFormat for EmptyFormat {
    type Output = ();

    async fn parse(_body: Bytes) -> Result<Self::Output, DecodeError> {
        Ok(())
    }

    fn content_type() -> Option<&'static str> {
        None
    }
}
