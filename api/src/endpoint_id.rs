use std::fmt;

use thiserror::Error;

/// A validated endpoint name.
///
/// Rules:
/// 1. Must start with an alphabetic character.
/// 2. Remaining characters must be alphanumeric or `_`.
///
/// Endpoint names double as keys of a binder's endpoint table, so they are
/// kept as `&'static str` borrowed from the `const` definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EndpointId(&'static str);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EndpointIdError {
    #[error("endpoint name cannot be empty")]
    Empty,
    #[error("endpoint name must start with an alphabetic character")]
    InvalidStartCharacter,
    #[error("endpoint name contains invalid character: '{0}'")]
    InvalidCharacter(char),
}

impl EndpointId {
    /// Validates `name` and wraps it.
    pub fn new(name: &'static str) -> Result<Self, EndpointIdError> {
        Self::validate(name)?;
        Ok(Self(name))
    }

    fn validate(s: &str) -> Result<(), EndpointIdError> {
        let mut chars = s.chars();

        match chars.next() {
            None => return Err(EndpointIdError::Empty),
            Some(c) if !c.is_alphabetic() => return Err(EndpointIdError::InvalidStartCharacter),
            _ => {}
        }

        if let Some(c) = chars.find(|c| !c.is_alphanumeric() && *c != '_') {
            return Err(EndpointIdError::InvalidCharacter(c));
        }

        Ok(())
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for EndpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl TryFrom<&'static str> for EndpointId {
    type Error = EndpointIdError;

    fn try_from(value: &'static str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
