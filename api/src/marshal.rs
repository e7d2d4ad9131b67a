//! Parameter marshaling.
//!
//! [`marshal`] turns a call's [`Params`] into a [`WireRequest`]: the query
//! pairs and body that will be sent for one [`ParamEncoding`]. The result is
//! a plain value so encodings can be inspected and tested without a server.
//!
//! Null parameters, including JSON `null` passed as a value, are dropped
//! under every encoding. Nothing is added that the caller did not pass.

use bytes::Bytes;
use reqwest::multipart::Part;
use serde_json::{Map, Value};
use tracing::debug;

use crate::endpoint::ParamEncoding;
use crate::error::MarshalError;
use crate::params::{ParamValue, Params, Record, Scalar};

/// Encoded parameters of one request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WireRequest {
    /// `key=value` pairs for the URL. Percent-encoding is left to the transport.
    pub query: Vec<(String, String)>,
    pub body: WireBody,
}

/// Request body.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum WireBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(Vec<FormPart>),
}

/// One part of a `multipart/form-data` body.
#[derive(Debug, Clone, PartialEq)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: String,
        data: Bytes,
    },
}

impl FormPart {
    /// The form field name of this part.
    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }
}

/// Encodes `params` for `encoding`.
///
/// ## Errors
///
/// Returns a [`MarshalError`] when a value has no representation in the
/// encoding: lists in a query string, blobs in JSON, records in a form,
/// blobs whose content type is not a MIME type, non-finite floats anywhere,
/// or anything but a single list for [`ParamEncoding::JsonArray`].
///
/// ## Examples
///
/// ```rust
/// use txtai_api::{marshal, ParamEncoding, Params, WireBody};
///
/// let params = Params::new().with("text", "Hola").with("source", None::<&str>);
/// let wire = marshal(ParamEncoding::Query, &params).unwrap();
///
/// assert_eq!(wire.query, vec![("text".to_string(), "Hola".to_string())]);
/// assert_eq!(wire.body, WireBody::Empty);
/// ```
pub fn marshal(encoding: ParamEncoding, params: &Params) -> Result<WireRequest, MarshalError> {
    let request = match encoding {
        ParamEncoding::Query => WireRequest {
            query: query_pairs(params)?,
            body: WireBody::Empty,
        },
        ParamEncoding::JsonBody => WireRequest {
            query: Vec::new(),
            body: WireBody::Json(json_object(params)?),
        },
        ParamEncoding::JsonArray => WireRequest {
            query: Vec::new(),
            body: WireBody::Json(json_array(params)?),
        },
        ParamEncoding::Multipart => WireRequest {
            query: Vec::new(),
            body: WireBody::Multipart(form_parts(params)?),
        },
    };

    debug!(
        encoding = %encoding,
        params = params.present().count(),
        query_pairs = request.query.len(),
        parts = match &request.body {
            WireBody::Multipart(parts) => parts.len(),
            _ => 0,
        },
        "marshaled parameters"
    );

    Ok(request)
}

fn query_pairs(params: &Params) -> Result<Vec<(String, String)>, MarshalError> {
    params
        .present()
        .map(|(name, value)| match value {
            ParamValue::Scalar(scalar) => {
                ensure_finite(name, scalar)?;
                Ok((name.to_string(), scalar.to_string()))
            }
            other => Err(MarshalError::unsupported(name, other.kind(), ParamEncoding::Query)),
        })
        .collect()
}

fn json_object(params: &Params) -> Result<Value, MarshalError> {
    let mut object = Map::new();
    for (name, value) in params.present() {
        object.insert(name.to_string(), json_value(name, value, ParamEncoding::JsonBody)?);
    }
    Ok(Value::Object(object))
}

fn json_array(params: &Params) -> Result<Value, MarshalError> {
    let mut present = params.present();
    let (name, value) = match (present.next(), present.next()) {
        (Some(only), None) => only,
        _ => {
            return Err(MarshalError::ArrayBody {
                count: params.present().count(),
            })
        }
    };

    match value {
        ParamValue::List(_) | ParamValue::Records(_) | ParamValue::Json(Value::Array(_)) => {
            json_value(name, value, ParamEncoding::JsonArray)
        }
        other => Err(MarshalError::unsupported(name, other.kind(), ParamEncoding::JsonArray)),
    }
}

fn json_value(name: &str, value: &ParamValue, encoding: ParamEncoding) -> Result<Value, MarshalError> {
    match value {
        ParamValue::Null => Ok(Value::Null),
        ParamValue::Scalar(scalar) => scalar_json(name, scalar),
        ParamValue::List(items) => items
            .iter()
            .map(|item| scalar_json(name, item))
            .collect::<Result<_, _>>()
            .map(Value::Array),
        ParamValue::Records(records) => records
            .iter()
            .map(|record| record_json(name, record))
            .collect::<Result<_, _>>()
            .map(Value::Array),
        ParamValue::Json(json) => Ok(json.clone()),
        ParamValue::Blobs { .. } => Err(MarshalError::unsupported(name, value.kind(), encoding)),
    }
}

fn record_json(name: &str, record: &Record) -> Result<Value, MarshalError> {
    let mut object = Map::new();
    for (field, value) in record.iter() {
        let json = match value {
            Some(scalar) => scalar_json(name, scalar)?,
            None => Value::Null,
        };
        object.insert(field.to_string(), json);
    }
    Ok(Value::Object(object))
}

fn scalar_json(name: &str, scalar: &Scalar) -> Result<Value, MarshalError> {
    scalar.to_json().ok_or_else(|| MarshalError::NonFiniteNumber {
        name: name.to_string(),
    })
}

fn ensure_finite(name: &str, scalar: &Scalar) -> Result<(), MarshalError> {
    if scalar.is_finite() {
        Ok(())
    } else {
        Err(MarshalError::NonFiniteNumber {
            name: name.to_string(),
        })
    }
}

/// Rejects content types the multipart builder would refuse at send time.
fn ensure_mime(name: &str, content_type: &str) -> Result<(), MarshalError> {
    match Part::bytes(Vec::<u8>::new()).mime_str(content_type) {
        Ok(_) => Ok(()),
        Err(_) => Err(MarshalError::InvalidContentType {
            name: name.to_string(),
            content_type: content_type.to_string(),
        }),
    }
}

fn form_parts(params: &Params) -> Result<Vec<FormPart>, MarshalError> {
    let mut parts = Vec::new();

    for (name, value) in params.present() {
        match value {
            ParamValue::Blobs { kind, blobs } => {
                for (i, blob) in blobs.iter().enumerate() {
                    let content_type = blob.part_content_type(*kind, i);
                    ensure_mime(name, &content_type)?;
                    parts.push(FormPart::File {
                        name: name.to_string(),
                        file_name: blob.part_file_name(*kind, i),
                        content_type,
                        data: blob.data().clone(),
                    });
                }
            }
            ParamValue::List(items) => {
                for item in items {
                    ensure_finite(name, item)?;
                    parts.push(FormPart::Text {
                        name: name.to_string(),
                        value: item.to_string(),
                    });
                }
            }
            ParamValue::Scalar(scalar) => {
                ensure_finite(name, scalar)?;
                parts.push(FormPart::Text {
                    name: name.to_string(),
                    value: scalar.to_string(),
                });
            }
            other => {
                return Err(MarshalError::unsupported(
                    name,
                    other.kind(),
                    ParamEncoding::Multipart,
                ))
            }
        }
    }

    Ok(parts)
}
