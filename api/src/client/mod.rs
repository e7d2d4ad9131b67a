//! HTTP client module.
//!
//! [`Transport`] owns the `reqwest` client and the bearer token policy.
//! [`Binder`] resolves a table of endpoint definitions against a base URL
//! and executes calls through the transport with tracing instrumentation.
//!
//! ## Examples
//!
//! ```rust,ignore
//! use txtai_api::{Binder, Endpoint, EndpointDef, JsonFormat, Params, ResponseShape, Transport};
//! use url::Url;
//!
//! const COUNT: Endpoint<JsonFormat<u64>> =
//!     Endpoint::new(EndpointDef::get("count", ResponseShape::Scalar));
//!
//! let transport = Transport::builder()
//!     .token("secret")
//!     .build()?;
//! let binder = Binder::new(Url::parse("http://localhost:8000")?, transport, &[*COUNT.def()])?;
//!
//! let count = binder.bind(COUNT).invoke(Params::new()).await?;
//! ```

mod binder;
mod transport;

pub use binder::{Binder, Bound};
pub use transport::{Transport, TransportBuilder};
