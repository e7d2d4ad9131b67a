//! Response handling module.
//!
//! Successful responses are decoded one of two ways:
//!
//! - **Typed**: an [`Endpoint<F>`](crate::Endpoint) decodes through its
//!   [`ResponseFormat`] `F` straight into a Rust type.
//! - **Dynamic**: [`ResponseShape::decode`] checks the body against an
//!   endpoint's declared shape and yields a [`TypedResponse`].

mod format;
mod ranked;
mod value;

pub use format::{EmptyFormat, JsonFormat, OpaqueFormat, ResponseFormat};
pub use ranked::{string_or_number, IndexResult, SearchResult};
pub use value::{ResponseShape, TypedResponse};
