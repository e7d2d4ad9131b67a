//! Declarative request binding for the txtai REST API.
//!
//! The `txtai-api` crate turns a table of endpoint definitions into typed,
//! callable stubs. Every call flows through the same three layers:
//!
//! - **Parameter marshaling** ([`marshal`]): a call's [`Params`] become a
//!   query string, a JSON body, or a multipart form depending on the
//!   endpoint's [`ParamEncoding`].
//! - **Endpoint binding** ([`Binder`]): resolves the endpoint against the base
//!   URL, sends the request and decodes the body with the endpoint's
//!   [`ResponseFormat`].
//! - **Transport** ([`Transport`]): a `reqwest` client carrying the optional
//!   bearer token that classifies every non-2xx response as a failure.
//!
//! ## Example
//!
//! ```rust,ignore
//! use txtai_api::{
//!     Binder, Endpoint, EndpointDef, JsonFormat, Params, ResponseShape, SearchResult, Transport,
//! };
//!
//! const SEARCH: Endpoint<JsonFormat<Vec<SearchResult>>> =
//!     Endpoint::new(EndpointDef::get("search", ResponseShape::Ranked));
//!
//! let transport = Transport::build(Some("secret"))?;
//! let binder = Binder::new(url::Url::parse("http://localhost:8000")?, transport, &[*SEARCH.def()])?;
//!
//! let results = binder
//!     .bind(SEARCH)
//!     .invoke(Params::new().with("query", "feel good story").with("limit", 1))
//!     .await?;
//! ```

pub mod client;
pub mod endpoint;
pub mod endpoint_id;
pub mod error;
pub mod marshal;
pub mod method;
pub mod params;
pub mod response;

pub use client::{Binder, Bound, Transport, TransportBuilder};
pub use endpoint::{Endpoint, EndpointDef, ParamEncoding};
pub use endpoint_id::{EndpointId, EndpointIdError};
pub use error::{ApiError, ConfigError, DecodeError, MarshalError, TransportError};
pub use marshal::{marshal, FormPart, WireBody, WireRequest};
pub use method::RestMethod;
pub use params::{Blob, BlobKind, ParamValue, Params, Record, Scalar};
pub use response::{
    EmptyFormat, IndexResult, JsonFormat, OpaqueFormat, ResponseFormat, ResponseShape,
    SearchResult, TypedResponse,
};
