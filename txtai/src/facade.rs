//! Construction shared by all facades.

use tracing::debug;
use txtai_api::{ApiError, Binder, EndpointDef, Transport};

use crate::config::{Config, ResolvedConfig};

/// A capability facade over one fixed endpoint table.
///
/// Implementors declare their endpoints and how to wrap a [`Binder`]; the
/// constructors are provided.
///
/// ## Examples
///
/// ```rust,ignore
/// use txtai::{Config, Facade, Summary};
///
/// let summary = Summary::with_token("http://localhost:8000", "secret")?;
/// let from_env = Summary::from_env()?;
/// let custom = Summary::from_config(&Config::new().url("http://gpu-box:8000"))?;
/// ```
pub trait Facade: Sized {
    /// Every endpoint this facade calls.
    const ENDPOINTS: &'static [EndpointDef];

    fn from_binder(binder: Binder) -> Self;

    fn binder(&self) -> &Binder;

    /// Builds the facade from an already resolved configuration.
    ///
    /// ## Errors
    ///
    /// Returns an error if the token is not a valid header value or the
    /// endpoint table is malformed.
    fn from_resolved(config: ResolvedConfig) -> Result<Self, ApiError> {
        let mut transport = Transport::builder().maybe_token(config.token);
        if let Some(timeout) = config.timeout {
            transport = transport.timeout(timeout);
        }

        let binder = Binder::new(config.url, transport.build()?, Self::ENDPOINTS)?;
        debug!(
            facade = std::any::type_name::<Self>(),
            url = %binder.base_url(),
            authenticated = binder.transport().is_authenticated(),
            "created txtai client"
        );

        Ok(Self::from_binder(binder))
    }

    /// Builds the facade from `config`, filling unset values from the
    /// environment.
    fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::from_resolved(config.resolve()?)
    }

    /// Connects to `url`. The token comes from `TXTAI_API_TOKEN`, if set.
    fn new(url: &str) -> Result<Self, ApiError> {
        Self::from_config(&Config::new().url(url))
    }

    /// Connects to `url` with a bearer token.
    fn with_token(url: &str, token: &str) -> Result<Self, ApiError> {
        Self::from_config(&Config::new().url(url).token(token))
    }

    /// Connects using `TXTAI_API_URL` and `TXTAI_API_TOKEN`.
    fn from_env() -> Result<Self, ApiError> {
        Self::from_config(&Config::new())
    }
}

/// Implements [`Facade`] for a struct with a single `binder` field.
macro_rules! facade {
    ($facade:ty, [$($endpoint:expr),+ $(,)?]) => {
        impl $crate::facade::Facade for $facade {
            const ENDPOINTS: &'static [txtai_api::EndpointDef] = &[$(*$endpoint.def()),+];

            fn from_binder(binder: txtai_api::Binder) -> Self {
                Self { binder }
            }

            fn binder(&self) -> &txtai_api::Binder {
                &self.binder
            }
        }
    };
}

pub(crate) use facade;
