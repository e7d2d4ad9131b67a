//! Endpoint definitions.
//!
//! An [`EndpointDef`] is the static description of one remote operation: its
//! name, HTTP method, path, how its parameters are encoded and the shape of
//! its response. Definitions are `const`-constructible so every facade can
//! declare its endpoint table once, at compile time.
//!
//! [`Endpoint`] pairs a definition with the [`ResponseFormat`] used to decode
//! its response, which is what makes a bound call strongly typed.

use std::fmt;
use std::marker::PhantomData;

use strum::{Display, EnumString};
use url::Url;

use crate::method::RestMethod;
use crate::response::{ResponseFormat, ResponseShape};

/// How a call's parameters are put on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum ParamEncoding {
    /// Scalar parameters as `key=value` pairs in the query string.
    Query,
    /// All parameters as the fields of one JSON object body.
    JsonBody,
    /// The single list-valued parameter as a bare JSON array body.
    JsonArray,
    /// A `multipart/form-data` body with file and text parts.
    Multipart,
}

/// Static description of one remote operation.
///
/// ## Examples
///
/// ```rust
/// use txtai_api::{EndpointDef, ParamEncoding, ResponseShape, RestMethod};
///
/// const SUMMARY: EndpointDef = EndpointDef::get("summary", ResponseShape::Scalar);
///
/// assert_eq!(SUMMARY.method(), RestMethod::Get);
/// assert_eq!(SUMMARY.path(), "summary");
/// assert_eq!(SUMMARY.encoding(), ParamEncoding::Query);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EndpointDef {
    name: &'static str,
    method: RestMethod,
    path: &'static str,
    encoding: ParamEncoding,
    shape: ResponseShape,
}

impl EndpointDef {
    /// Creates a definition from all of its parts.
    pub const fn new(
        name: &'static str,
        method: RestMethod,
        path: &'static str,
        encoding: ParamEncoding,
        shape: ResponseShape,
    ) -> Self {
        Self {
            name,
            method,
            path,
            encoding,
            shape,
        }
    }

    /// A `GET` endpoint served at the path equal to its name.
    pub const fn get(name: &'static str, shape: ResponseShape) -> Self {
        Self::new(name, RestMethod::Get, name, ParamEncoding::Query, shape)
    }

    /// A `POST` endpoint served at the path equal to its name.
    pub const fn post(name: &'static str, encoding: ParamEncoding, shape: ResponseShape) -> Self {
        Self::new(name, RestMethod::Post, name, encoding, shape)
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn method(&self) -> RestMethod {
        self.method
    }

    /// Path relative to the API base URL.
    pub const fn path(&self) -> &'static str {
        self.path
    }

    pub const fn encoding(&self) -> ParamEncoding {
        self.encoding
    }

    /// The declared shape of a successful response.
    pub const fn shape(&self) -> ResponseShape {
        self.shape
    }

    /// Resolves this endpoint's path against `base_url`.
    ///
    /// `base_url` is expected to end with `/`; otherwise its last path segment
    /// is replaced, following the usual relative URL rules.
    pub fn url(&self, base_url: &Url) -> Result<Url, url::ParseError> {
        base_url.join(self.path)
    }
}

impl fmt::Display for EndpointDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.method, self.path, self.encoding)
    }
}

/// An [`EndpointDef`] typed by the format of its response.
///
/// ## Type Parameters
///
/// - `F`: The [`ResponseFormat`] used to decode a successful response.
///
/// ## Examples
///
/// ```rust
/// use txtai_api::{Endpoint, EndpointDef, JsonFormat, ResponseShape};
///
/// const COUNT: Endpoint<JsonFormat<u64>> =
///     Endpoint::new(EndpointDef::get("count", ResponseShape::Scalar));
///
/// assert_eq!(COUNT.name(), "count");
/// ```
pub struct Endpoint<F> {
    def: EndpointDef,
    _format: PhantomData<fn() -> F>,
}

impl<F> Endpoint<F> {
    pub const fn new(def: EndpointDef) -> Self {
        Self {
            def,
            _format: PhantomData,
        }
    }

    pub const fn def(&self) -> &EndpointDef {
        &self.def
    }

    pub const fn name(&self) -> &'static str {
        self.def.name
    }
}

// Manual impls: `F` itself is never stored, so no bounds on it are needed.
impl<F> Clone for Endpoint<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F> Copy for Endpoint<F> {}

impl<F: ResponseFormat> fmt::Debug for Endpoint<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("def", &self.def)
            .field("format", &std::any::type_name::<F>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::{EmptyFormat, JsonFormat};

    const SEARCH: EndpointDef = EndpointDef::get("search", ResponseShape::Ranked);
    const ADD: EndpointDef = EndpointDef::post("add", ParamEncoding::JsonArray, ResponseShape::Void);

    #[test]
    fn test_get_uses_query_encoding() {
        assert_eq!(SEARCH.name(), "search");
        assert_eq!(SEARCH.method(), RestMethod::Get);
        assert_eq!(SEARCH.path(), "search");
        assert_eq!(SEARCH.encoding(), ParamEncoding::Query);
        assert_eq!(SEARCH.shape(), ResponseShape::Ranked);
    }

    #[test]
    fn test_post_keeps_declared_encoding() {
        assert_eq!(ADD.method(), RestMethod::Post);
        assert_eq!(ADD.encoding(), ParamEncoding::JsonArray);
        assert_eq!(ADD.shape(), ResponseShape::Void);
    }

    #[test]
    fn test_url_resolves_beneath_base() {
        let base = Url::parse("http://localhost:8000/txtai/").unwrap();
        assert_eq!(
            SEARCH.url(&base).unwrap().as_str(),
            "http://localhost:8000/txtai/search"
        );
    }

    #[test]
    fn test_encoding_display() {
        assert_eq!(ParamEncoding::JsonBody.to_string(), "json-body");
        assert_eq!(ParamEncoding::Multipart.to_string(), "multipart");
        assert_eq!(
            "json-array".parse::<ParamEncoding>().unwrap(),
            ParamEncoding::JsonArray
        );
    }

    #[test]
    fn test_def_display() {
        assert_eq!(ADD.to_string(), "POST add (json-array)");
    }

    #[test]
    fn test_typed_endpoint_is_copy() {
        const INDEX: Endpoint<EmptyFormat> =
            Endpoint::new(EndpointDef::get("index", ResponseShape::Void));
        let copy = INDEX;
        assert_eq!(copy.name(), INDEX.name());
        assert_eq!(*copy.def(), *INDEX.def());
    }

    #[test]
    fn test_typed_endpoint_debug_names_format() {
        const COUNT: Endpoint<JsonFormat<u64>> =
            Endpoint::new(EndpointDef::get("count", ResponseShape::Scalar));
        let debug = format!("{COUNT:?}");
        assert!(debug.contains("count"));
        assert!(debug.contains("JsonFormat"));
    }
}
