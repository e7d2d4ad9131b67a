//! HTTP methods used by txtai endpoints.

use strum::{Display, EnumIter, EnumString};

/// HTTP method of an endpoint definition.
///
/// The txtai API only exposes `GET` and `POST` routes. `GET` routes carry
/// their parameters in the query string; `POST` routes carry a body.
///
/// ## Examples
///
/// ```rust
/// use txtai_api::RestMethod;
///
/// let method = RestMethod::Get;
/// assert!(!method.has_body());
///
/// let parsed: RestMethod = "POST".parse().unwrap();
/// assert_eq!(parsed, RestMethod::Post);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum RestMethod {
    /// HTTP GET - read-only call, parameters in the query string.
    Get,
    /// HTTP POST - call with a JSON or multipart body.
    Post,
}

impl RestMethod {
    /// Returns `true` if requests with this method carry a body.
    pub const fn has_body(&self) -> bool {
        matches!(self, Self::Post)
    }

    /// Converts to the equivalent `reqwest::Method`.
    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
        }
    }
}

impl From<RestMethod> for reqwest::Method {
    fn from(method: RestMethod) -> Self {
        method.to_reqwest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_display() {
        assert_eq!(RestMethod::Get.to_string(), "GET");
        assert_eq!(RestMethod::Post.to_string(), "POST");
    }

    #[test]
    fn test_parse() {
        assert_eq!("GET".parse::<RestMethod>().unwrap(), RestMethod::Get);
        assert_eq!("POST".parse::<RestMethod>().unwrap(), RestMethod::Post);
        assert!("PATCH".parse::<RestMethod>().is_err());
    }

    #[test]
    fn test_has_body() {
        assert!(!RestMethod::Get.has_body());
        assert!(RestMethod::Post.has_body());
    }

    #[test]
    fn test_to_reqwest() {
        let methods: Vec<reqwest::Method> = RestMethod::iter().map(Into::into).collect();
        assert_eq!(methods, vec![reqwest::Method::GET, reqwest::Method::POST]);
    }
}
