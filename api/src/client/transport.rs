//! HTTP transport with bearer authentication.
//!
//! A [`Transport`] is built once per service and shared by every call. It
//! adds `Authorization: Bearer <token>` when configured and turns every
//! response outside `200..=299` into a [`TransportError`].

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::multipart::{Form, Part};
use tracing::{warn, Span};
use url::Url;

use crate::error::{ApiError, ConfigError, TransportError};
use crate::marshal::{FormPart, WireBody, WireRequest};
use crate::method::RestMethod;

/// Builder for configuring a [`Transport`].
#[derive(Default)]
pub struct TransportBuilder {
    token: Option<String>,
    timeout: Option<Duration>,
}

impl std::fmt::Debug for TransportBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportBuilder")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl TransportBuilder {
    /// Sets the bearer token sent with every request.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets or clears the bearer token.
    pub fn maybe_token(mut self, token: Option<impl Into<String>>) -> Self {
        self.token = token.map(Into::into);
        self
    }

    /// Sets a per-request timeout. Without one, requests wait indefinitely.
    ///
    /// ## Examples
    ///
    /// ```rust,ignore
    /// use std::time::Duration;
    ///
    /// let transport = Transport::builder()
    ///     .timeout(Duration::from_secs(60))
    ///     .build()?;
    /// ```
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`Transport`].
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidToken`] if the token cannot be sent as a
    /// header value, or [`ConfigError::Client`] if the HTTP client cannot be
    /// constructed.
    pub fn build(self) -> Result<Transport, ApiError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &self.token {
            let mut value = HeaderValue::try_from(format!("Bearer {token}"))
                .map_err(|_| ConfigError::InvalidToken)?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ConfigError::Client)?;

        Ok(Transport {
            client,
            authenticated: self.token.is_some(),
        })
    }
}

/// Async HTTP transport shared by all endpoints of a service.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct Transport {
    client: reqwest::Client,
    authenticated: bool,
}

impl Transport {
    /// Creates a new builder for configuring a transport.
    pub fn builder() -> TransportBuilder {
        TransportBuilder::default()
    }

    /// Creates a transport with an optional bearer token and no timeout.
    ///
    /// ## Errors
    ///
    /// Returns an error if the token is not a valid header value.
    pub fn build(token: Option<&str>) -> Result<Self, ApiError> {
        Self::builder().maybe_token(token).build()
    }

    /// Returns `true` if requests carry a bearer token.
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Sends one request and returns the body of a successful response.
    ///
    /// Records `http.status_code` and `otel.status_code` on the current span.
    ///
    /// ## Errors
    ///
    /// Returns [`TransportError::Request`] on network failures and
    /// [`TransportError::HttpStatus`] with the response body for any status
    /// outside `200..=299`.
    pub async fn send(
        &self,
        method: RestMethod,
        url: Url,
        wire: WireRequest,
    ) -> Result<Bytes, TransportError> {
        let mut request = self.client.request(method.to_reqwest(), url);

        if !wire.query.is_empty() {
            request = request.query(&wire.query);
        }
        request = match wire.body {
            WireBody::Empty => request,
            WireBody::Json(body) => request.json(&body),
            WireBody::Multipart(parts) => request.multipart(multipart_form(parts)?),
        };

        let response = request.send().await?;

        let status = response.status();
        let status_code = status.as_u16();
        Span::current().record("http.status_code", status_code);

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| status.to_string());

            let otel_status = if status.is_server_error() {
                "ERROR"
            } else {
                "UNSET"
            };
            Span::current().record("otel.status_code", otel_status);
            warn!(status = status_code, body = %message, "request failed");

            return Err(TransportError::HttpStatus {
                status: status_code,
                message,
            });
        }

        Span::current().record("otel.status_code", "OK");
        Ok(response.bytes().await?)
    }
}

fn multipart_form(parts: Vec<FormPart>) -> Result<Form, TransportError> {
    parts.into_iter().try_fold(Form::new(), |form, part| match part {
        FormPart::Text { name, value } => Ok(form.text(name, value)),
        FormPart::File {
            name,
            file_name,
            content_type,
            data,
        } => {
            let part = Part::bytes(data.to_vec())
                .file_name(file_name)
                .mime_str(&content_type)?;
            Ok(form.part(name, part))
        }
    })
}
