//! Endpoint binding with tracing instrumentation.
//!
//! A [`Binder`] holds the validated endpoint table of one service together
//! with its base URL and [`Transport`]. Binding a typed [`Endpoint`] yields a
//! [`Bound`] call whose [`invoke`](Bound::invoke) marshals parameters, sends
//! the request and decodes the response.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{instrument, Span};
use url::Url;

use super::Transport;
use crate::endpoint::{Endpoint, EndpointDef, ParamEncoding};
use crate::endpoint_id::EndpointId;
use crate::error::{ApiError, ConfigError};
use crate::marshal::marshal;
use crate::params::Params;
use crate::response::{ResponseFormat, TypedResponse};

/// Callable endpoint table for one service.
///
/// Cloning is cheap: the table is shared and the transport is reference
/// counted.
///
/// ## Examples
///
/// ```rust,ignore
/// use txtai_api::{Binder, Endpoint, EndpointDef, JsonFormat, Params, ResponseShape, Transport};
/// use url::Url;
///
/// const SUMMARY: Endpoint<JsonFormat<String>> =
///     Endpoint::new(EndpointDef::get("summary", ResponseShape::Scalar));
///
/// let binder = Binder::new(
///     Url::parse("http://localhost:8000")?,
///     Transport::build(None)?,
///     &[*SUMMARY.def()],
/// )?;
///
/// let summary = binder
///     .bind(SUMMARY)
///     .invoke(Params::new().with("text", "Long text to summarize"))
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct Binder {
    base_url: Url,
    transport: Transport,
    endpoints: Arc<HashMap<&'static str, EndpointDef>>,
}

impl Binder {
    /// Validates `defs` and creates a binder for them.
    ///
    /// `base_url` gets a trailing `/` if it lacks one, so endpoint paths
    /// resolve beneath it rather than replacing its last segment.
    ///
    /// ## Errors
    ///
    /// Returns a [`ConfigError`] if:
    /// - `base_url` cannot serve as a base for relative paths
    /// - an endpoint name is not a valid [`EndpointId`]
    /// - two definitions share a name
    /// - a `GET` definition uses anything but query encoding
    pub fn new(base_url: Url, transport: Transport, defs: &[EndpointDef]) -> Result<Self, ApiError> {
        let base_url = normalize_base(base_url)?;

        let mut endpoints = HashMap::with_capacity(defs.len());
        for def in defs {
            EndpointId::new(def.name()).map_err(ConfigError::from)?;

            if !def.method().has_body() && def.encoding() != ParamEncoding::Query {
                return Err(ConfigError::EncodingMismatch {
                    id: def.name().to_string(),
                    method: def.method(),
                }
                .into());
            }

            if endpoints.insert(def.name(), *def).is_some() {
                return Err(ConfigError::DuplicateEndpoint {
                    id: def.name().to_string(),
                }
                .into());
            }
        }

        Ok(Self {
            base_url,
            transport,
            endpoints: Arc::new(endpoints),
        })
    }

    /// Returns the normalized base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Looks up a registered definition by name.
    pub fn endpoint(&self, name: &str) -> Option<&EndpointDef> {
        self.endpoints.get(name)
    }

    /// Iterates over the registered definitions in no particular order.
    pub fn endpoints(&self) -> impl Iterator<Item = &EndpointDef> {
        self.endpoints.values()
    }

    /// Binds a typed endpoint to this binder.
    ///
    /// Binding never fails; an endpoint missing from the table is reported
    /// when the call is invoked.
    pub fn bind<F: ResponseFormat>(&self, endpoint: Endpoint<F>) -> Bound<'_, F> {
        Bound {
            binder: self,
            endpoint,
        }
    }

    /// Invokes a registered endpoint by name and decodes the response
    /// according to its declared shape.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::UnknownEndpoint`] before any network call if
    /// `name` is not registered, otherwise any marshaling, transport or
    /// decoding error of the call.
    #[instrument(
        name = "api_request",
        skip_all,
        fields(
            endpoint = tracing::field::Empty,
            http.method = tracing::field::Empty,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    pub async fn call_shaped(&self, name: &str, params: Params) -> Result<TypedResponse, ApiError> {
        let def = *self
            .endpoint(name)
            .ok_or_else(|| ConfigError::unknown_endpoint(name))?;

        let body = self.execute(&def, &params).await?;
        Ok(def.shape().decode(&body)?)
    }

    /// Resolves, marshals and sends one call. Records span fields on the
    /// caller's `api_request` span.
    async fn execute(&self, def: &EndpointDef, params: &Params) -> Result<Bytes, ApiError> {
        let span = Span::current();
        span.record("endpoint", def.name());
        span.record("http.method", def.method().to_string().as_str());

        let url = def.url(&self.base_url).map_err(ConfigError::InvalidUrl)?;
        span.record("http.url", url.as_str());

        let wire = marshal(def.encoding(), params)?;
        let body = self.transport.send(def.method(), url, wire).await?;
        Ok(body)
    }
}

fn normalize_base(mut base_url: Url) -> Result<Url, ConfigError> {
    if base_url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl(
            url::ParseError::RelativeUrlWithCannotBeABaseBase,
        ));
    }

    if !base_url.path().ends_with('/') {
        let path = format!("{}/", base_url.path());
        base_url.set_path(&path);
    }
    Ok(base_url)
}

/// A typed endpoint bound to a [`Binder`].
pub struct Bound<'a, F> {
    binder: &'a Binder,
    endpoint: Endpoint<F>,
}

impl<F: ResponseFormat> Bound<'_, F> {
    /// Executes the call with `params` and decodes the response with `F`.
    ///
    /// ## Errors
    ///
    /// Returns an error if:
    /// - The endpoint is not registered with the binder ([`ConfigError::UnknownEndpoint`])
    /// - A parameter cannot be encoded for the endpoint ([`MarshalError`](crate::MarshalError))
    /// - The request fails or the server returns a non-success status code
    /// - The response cannot be decoded
    #[instrument(
        name = "api_request",
        skip_all,
        fields(
            endpoint = tracing::field::Empty,
            http.method = tracing::field::Empty,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    pub async fn invoke(&self, params: Params) -> Result<F::Output, ApiError> {
        let def = self.endpoint.def();
        if self.binder.endpoint(def.name()) != Some(def) {
            return Err(ConfigError::unknown_endpoint(def.name()).into());
        }

        let body = self.binder.execute(def, &params).await?;
        Ok(F::parse(body).await?)
    }

    pub fn endpoint(&self) -> &Endpoint<F> {
        &self.endpoint
    }
}

impl<F: ResponseFormat> fmt::Debug for Bound<'_, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bound")
            .field("base_url", &self.binder.base_url.as_str())
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DecodeError, MarshalError, TransportError};
    use crate::method::RestMethod;
    use crate::params::ParamValue;
    use crate::response::{
        EmptyFormat, IndexResult, JsonFormat, ResponseShape, SearchResult,
    };
    use serde_json::json;
    use tracing_test::traced_test;
    use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SEARCH: Endpoint<JsonFormat<Vec<SearchResult>>> =
        Endpoint::new(EndpointDef::get("search", ResponseShape::Ranked));
    const SIMILARITY: Endpoint<JsonFormat<Vec<IndexResult>>> = Endpoint::new(EndpointDef::post(
        "similarity",
        ParamEncoding::JsonBody,
        ResponseShape::Ranked,
    ));
    const ADD: Endpoint<EmptyFormat> = Endpoint::new(EndpointDef::post(
        "add",
        ParamEncoding::JsonArray,
        ResponseShape::Void,
    ));
    const COUNT: Endpoint<JsonFormat<u64>> =
        Endpoint::new(EndpointDef::get("count", ResponseShape::Scalar));

    const ENDPOINTS: &[EndpointDef] = &[*SEARCH.def(), *SIMILARITY.def(), *ADD.def()];

    fn binder(server: &MockServer) -> Binder {
        Binder::new(
            Url::parse(&server.uri()).unwrap(),
            Transport::build(None).unwrap(),
            ENDPOINTS,
        )
        .unwrap()
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let binder = Binder::new(
            Url::parse("http://localhost:8000/api").unwrap(),
            Transport::build(None).unwrap(),
            ENDPOINTS,
        )
        .unwrap();
        assert_eq!(binder.base_url().as_str(), "http://localhost:8000/api/");
        assert_eq!(
            SEARCH.def().url(binder.base_url()).unwrap().as_str(),
            "http://localhost:8000/api/search"
        );
    }

    #[test]
    fn test_rejects_cannot_be_a_base_url() {
        let result = Binder::new(
            Url::parse("mailto:someone@example.com").unwrap(),
            Transport::build(None).unwrap(),
            ENDPOINTS,
        );
        assert!(matches!(
            result,
            Err(ApiError::Config(ConfigError::InvalidUrl(_)))
        ));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let result = Binder::new(
            Url::parse("http://localhost:8000").unwrap(),
            Transport::build(None).unwrap(),
            &[*SEARCH.def(), *SEARCH.def()],
        );
        assert!(matches!(
            result,
            Err(ApiError::Config(ConfigError::DuplicateEndpoint { id })) if id == "search"
        ));
    }

    #[test]
    fn test_rejects_invalid_name() {
        let bad = EndpointDef::new(
            "batch-search",
            RestMethod::Post,
            "batchsearch",
            ParamEncoding::JsonBody,
            ResponseShape::RankedBatch,
        );
        let result = Binder::new(
            Url::parse("http://localhost:8000").unwrap(),
            Transport::build(None).unwrap(),
            &[bad],
        );
        assert!(matches!(
            result,
            Err(ApiError::Config(ConfigError::InvalidEndpointId(_)))
        ));
    }

    #[test]
    fn test_rejects_get_with_body_encoding() {
        let bad = EndpointDef::new(
            "transform",
            RestMethod::Get,
            "transform",
            ParamEncoding::JsonBody,
            ResponseShape::List,
        );
        let result = Binder::new(
            Url::parse("http://localhost:8000").unwrap(),
            Transport::build(None).unwrap(),
            &[bad],
        );
        assert!(matches!(
            result,
            Err(ApiError::Config(ConfigError::EncodingMismatch {
                method: RestMethod::Get,
                ..
            }))
        ));
    }

    #[tokio::test]
    async fn test_invoke_get_omits_null_params() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("query", "feel good story"))
            .and(query_param("limit", "1"))
            .and(query_param_is_missing("weights"))
            .and(query_param_is_missing("index"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"id": "4", "score": 0.52}])),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let results = binder(&mock_server)
            .bind(SEARCH)
            .invoke(
                Params::new()
                    .with("query", "feel good story")
                    .with("limit", 1)
                    .with("weights", None::<f32>)
                    .with("index", None::<&str>),
            )
            .await
            .unwrap();

        assert_eq!(
            results,
            vec![SearchResult {
                id: "4".into(),
                score: 0.52
            }]
        );
    }

    #[tokio::test]
    async fn test_invoke_post_json_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/similarity"))
            .and(body_json(json!({"query": "feel good story", "texts": ["a", "b"]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "score": 0.9},
                {"id": 0, "score": 0.1}
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let results = binder(&mock_server)
            .bind(SIMILARITY)
            .invoke(
                Params::new()
                    .with("query", "feel good story")
                    .with("texts", ParamValue::list(["a", "b"])),
            )
            .await
            .unwrap();

        assert_eq!(results[0], IndexResult { id: 1, score: 0.9 });
        assert_eq!(results[1].id, 0);
    }

    #[tokio::test]
    async fn test_invoke_void_ignores_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/add"))
            .and(body_json(json!(["x"])))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .expect(1)
            .mount(&mock_server)
            .await;

        binder(&mock_server)
            .bind(ADD)
            .invoke(Params::new().with("documents", ParamValue::list(["x"])))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_unknown_endpoint_fails_before_network() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("1"))
            .expect(0)
            .mount(&mock_server)
            .await;

        let result = binder(&mock_server).bind(COUNT).invoke(Params::new()).await;
        assert!(matches!(
            result,
            Err(ApiError::Config(ConfigError::UnknownEndpoint { id })) if id == "count"
        ));
    }

    #[tokio::test]
    async fn test_marshal_error_fails_before_network() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(0)
            .mount(&mock_server)
            .await;

        let result = binder(&mock_server)
            .bind(SEARCH)
            .invoke(Params::new().with("query", ParamValue::list(["a", "b"])))
            .await;
        assert!(matches!(
            result,
            Err(ApiError::Marshal(MarshalError::Unsupported { .. }))
        ));
    }

    #[tokio::test]
    async fn test_transport_failure_is_not_rewrapped() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
            .mount(&mock_server)
            .await;

        let err = binder(&mock_server)
            .bind(SEARCH)
            .invoke(Params::new().with("query", "q"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ApiError::Transport(TransportError::HttpStatus { status: 500, .. })
        ));
        assert_eq!(err.to_string(), "HTTP 500: internal error");
    }

    #[tokio::test]
    async fn test_decode_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not valid json"))
            .mount(&mock_server)
            .await;

        let result = binder(&mock_server)
            .bind(SEARCH)
            .invoke(Params::new().with("query", "q"))
            .await;
        assert!(matches!(
            result,
            Err(ApiError::Decode(DecodeError::JsonParse(_)))
        ));
    }

    #[tokio::test]
    async fn test_call_shaped_uses_declared_shape() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/similarity"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"id": 2, "score": 0.75}])),
            )
            .mount(&mock_server)
            .await;

        let response = binder(&mock_server)
            .call_shaped(
                "similarity",
                Params::new()
                    .with("query", "q")
                    .with("texts", ParamValue::list(["a", "b", "c"])),
            )
            .await
            .unwrap();

        assert_eq!(response.shape(), ResponseShape::Ranked);
        assert_eq!(response.as_ranked().unwrap()[0].id, "2");
    }

    #[tokio::test]
    async fn test_call_shaped_unknown_name() {
        let mock_server = MockServer::start().await;
        let result = binder(&mock_server).call_shaped("workflow", Params::new()).await;
        assert!(matches!(
            result,
            Err(ApiError::Config(ConfigError::UnknownEndpoint { .. }))
        ));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_failed_request_is_logged() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&mock_server)
            .await;

        let _ = binder(&mock_server)
            .bind(SEARCH)
            .invoke(Params::new().with("query", "q"))
            .await;

        assert!(logs_contain("marshaled parameters"));
        assert!(logs_contain("request failed"));
        assert!(logs_contain("overloaded"));
    }
}
