//! Declared response shapes and dynamically decoded responses.

use serde_json::Value;
use strum::{Display, EnumString};

use crate::error::DecodeError;

use super::SearchResult;

/// The declared shape of an endpoint's successful response.
///
/// ## Examples
///
/// ```rust
/// use txtai_api::{ResponseShape, TypedResponse};
///
/// let response = ResponseShape::Scalar.decode(b"42").unwrap();
/// assert_eq!(response.as_scalar().and_then(|v| v.as_u64()), Some(42));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum ResponseShape {
    /// A single JSON string, number or boolean.
    Scalar,
    /// A JSON array of values.
    List,
    /// A JSON array of arrays, one per batch input.
    ListBatch,
    /// A JSON array of ranked results.
    Ranked,
    /// A JSON array of ranked result arrays, one per batch input.
    RankedBatch,
    /// Any JSON value, undecoded.
    Opaque,
    /// No meaningful body.
    Void,
}

/// A response decoded according to its [`ResponseShape`].
#[derive(Debug, Clone, PartialEq)]
pub enum TypedResponse {
    Scalar(Value),
    List(Vec<Value>),
    ListBatch(Vec<Vec<Value>>),
    Ranked(Vec<SearchResult>),
    RankedBatch(Vec<Vec<SearchResult>>),
    Opaque(Value),
    Void,
}

impl ResponseShape {
    /// Decodes `body` into this shape.
    ///
    /// Ranked results decode with string ids; positional results (similarity,
    /// labels) come back as their decimal index.
    pub fn decode(self, body: &[u8]) -> Result<TypedResponse, DecodeError> {
        if self == Self::Void {
            return Ok(TypedResponse::Void);
        }
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(DecodeError::EmptyBody);
        }

        let value: Value = serde_json::from_slice(body)?;
        match self {
            Self::Scalar => match value {
                Value::String(_) | Value::Number(_) | Value::Bool(_) => {
                    Ok(TypedResponse::Scalar(value))
                }
                other => Err(self.mismatch(&other)),
            },
            Self::List => match value {
                Value::Array(items) => Ok(TypedResponse::List(items)),
                other => Err(self.mismatch(&other)),
            },
            Self::ListBatch => match value {
                Value::Array(rows) => rows
                    .into_iter()
                    .map(|row| match row {
                        Value::Array(items) => Ok(items),
                        other => Err(self.mismatch(&other)),
                    })
                    .collect::<Result<_, _>>()
                    .map(TypedResponse::ListBatch),
                other => Err(self.mismatch(&other)),
            },
            Self::Ranked => match value {
                Value::Array(_) => Ok(TypedResponse::Ranked(serde_json::from_value(value)?)),
                other => Err(self.mismatch(&other)),
            },
            Self::RankedBatch => match value {
                Value::Array(_) => Ok(TypedResponse::RankedBatch(serde_json::from_value(value)?)),
                other => Err(self.mismatch(&other)),
            },
            Self::Opaque => Ok(TypedResponse::Opaque(value)),
            Self::Void => Ok(TypedResponse::Void),
        }
    }

    fn mismatch(self, found: &Value) -> DecodeError {
        DecodeError::ShapeMismatch {
            expected: self,
            found: json_kind(found),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl TypedResponse {
    /// The shape this response was decoded as.
    pub fn shape(&self) -> ResponseShape {
        match self {
            Self::Scalar(_) => ResponseShape::Scalar,
            Self::List(_) => ResponseShape::List,
            Self::ListBatch(_) => ResponseShape::ListBatch,
            Self::Ranked(_) => ResponseShape::Ranked,
            Self::RankedBatch(_) => ResponseShape::RankedBatch,
            Self::Opaque(_) => ResponseShape::Opaque,
            Self::Void => ResponseShape::Void,
        }
    }

    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            Self::Scalar(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_ranked(&self) -> Option<&[SearchResult]> {
        match self {
            Self::Ranked(results) => Some(results),
            _ => None,
        }
    }

    pub fn as_ranked_batch(&self) -> Option<&[Vec<SearchResult>]> {
        match self {
            Self::RankedBatch(results) => Some(results),
            _ => None,
        }
    }

    /// Returns `true` for [`TypedResponse::Void`].
    pub fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar() {
        let response = ResponseShape::Scalar.decode(br#""a summary""#).unwrap();
        assert_eq!(response, TypedResponse::Scalar(json!("a summary")));
        assert_eq!(response.shape(), ResponseShape::Scalar);
    }

    #[test]
    fn test_scalar_rejects_array() {
        let err = ResponseShape::Scalar.decode(b"[1, 2]").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::ShapeMismatch {
                expected: ResponseShape::Scalar,
                found: "array"
            }
        ));
    }

    #[test]
    fn test_list_batch() {
        let response = ResponseShape::ListBatch.decode(b"[[0.1, 0.2], [0.3]]").unwrap();
        let TypedResponse::ListBatch(rows) = response else {
            panic!("expected list batch");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec![json!(0.3)]);
    }

    #[test]
    fn test_list_batch_rejects_flat_list() {
        let err = ResponseShape::ListBatch.decode(b"[0.1, 0.2]").unwrap_err();
        assert!(matches!(err, DecodeError::ShapeMismatch { found: "number", .. }));
    }

    #[test]
    fn test_ranked_keeps_server_order() {
        let body = br#"[{"id": "3", "score": 0.2}, {"id": "1", "score": 0.9}]"#;
        let response = ResponseShape::Ranked.decode(body).unwrap();
        let ids: Vec<_> = response
            .as_ranked()
            .unwrap()
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["3", "1"]);
    }

    #[test]
    fn test_ranked_batch_with_positions() {
        let body = br#"[[{"id": 0, "score": 0.5}], []]"#;
        let response = ResponseShape::RankedBatch.decode(body).unwrap();
        let batch = response.as_ranked_batch().unwrap();
        assert_eq!(batch[0][0].id, "0");
        assert!(batch[1].is_empty());
    }

    #[test]
    fn test_ranked_rejects_bad_items() {
        let err = ResponseShape::Ranked.decode(br#"[{"uid": 1}]"#).unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_opaque_accepts_anything() {
        let response = ResponseShape::Opaque.decode(br#"{"a": [1]}"#).unwrap();
        assert_eq!(response, TypedResponse::Opaque(json!({"a": [1]})));
    }

    #[test]
    fn test_void_ignores_body() {
        assert!(ResponseShape::Void.decode(b"").unwrap().is_void());
        assert!(ResponseShape::Void.decode(b"not json").unwrap().is_void());
    }

    #[test]
    fn test_empty_body_is_error() {
        let err = ResponseShape::List.decode(b"").unwrap_err();
        assert!(matches!(err, DecodeError::EmptyBody));
    }

    #[test]
    fn test_shape_display() {
        assert_eq!(ResponseShape::RankedBatch.to_string(), "ranked-batch");
    }
}
