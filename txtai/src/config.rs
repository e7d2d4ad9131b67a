//! Client configuration.
//!
//! A [`Config`] holds whatever the caller supplied explicitly. Resolving it
//! fills the gaps from the environment, once, at facade construction:
//!
//! | Setting | Environment variable |
//! |---------|----------------------|
//! | `url` | `TXTAI_API_URL` |
//! | `token` | `TXTAI_API_TOKEN` |
//!
//! Empty values count as unset.

use std::fmt;
use std::time::Duration;

use txtai_api::ConfigError;
use url::Url;

/// Environment variable holding the default service URL.
pub const URL_VAR: &str = "TXTAI_API_URL";

/// Environment variable holding the default bearer token.
pub const TOKEN_VAR: &str = "TXTAI_API_TOKEN";

/// Connection settings for a txtai service.
///
/// ## Examples
///
/// ```rust
/// use std::time::Duration;
/// use txtai::Config;
///
/// let config = Config::new()
///     .url("http://localhost:8000")
///     .timeout(Duration::from_secs(30));
///
/// let resolved = config.resolve_with(|_| None).unwrap();
/// assert_eq!(resolved.url.as_str(), "http://localhost:8000/");
/// assert!(resolved.token.is_none());
/// ```
#[derive(Clone, Default)]
pub struct Config {
    url: Option<String>,
    token: Option<String>,
    timeout: Option<Duration>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the service base URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the bearer token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets a per-request timeout. There is none by default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Resolves against the process environment.
    ///
    /// ## Errors
    ///
    /// See [`resolve_with`](Self::resolve_with).
    pub fn resolve(&self) -> Result<ResolvedConfig, ConfigError> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    /// Resolves using `lookup` for settings that were not given explicitly.
    ///
    /// ## Errors
    ///
    /// - [`ConfigError::MissingField`] if no URL is configured anywhere
    /// - [`ConfigError::InvalidUrl`] if the URL does not parse
    pub fn resolve_with<F>(&self, lookup: F) -> Result<ResolvedConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = non_empty(self.url.clone())
            .or_else(|| non_empty(lookup(URL_VAR)))
            .ok_or_else(|| ConfigError::missing_field("url"))?;
        let token = non_empty(self.token.clone()).or_else(|| non_empty(lookup(TOKEN_VAR)));

        let mut url = Url::parse(&url)?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(ResolvedConfig {
            url,
            token,
            timeout: self.timeout,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("url", &self.url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// A [`Config`] with every default applied.
#[derive(Clone)]
pub struct ResolvedConfig {
    pub url: Url,
    pub token: Option<String>,
    pub timeout: Option<Duration>,
}

impl fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("url", &self.url.as_str())
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}
