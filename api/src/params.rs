//! Call parameters.
//!
//! [`Params`] is the ordered name → value mapping a facade builds for every
//! call. Values are a closed set ([`ParamValue`]) so the marshaler can decide
//! exhaustively how each one is encoded.

use std::fmt;
use std::path::Path;

use bytes::Bytes;
use serde_json::Value;

use crate::error::MarshalError;

/// A single scalar value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Int(i64),
    /// Unsigned integers above `i64::MAX`.
    UInt(u64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    /// JSON representation, or `None` for non-finite floats.
    pub fn to_json(&self) -> Option<Value> {
        match self {
            Self::Text(s) => Some(Value::String(s.clone())),
            Self::Int(n) => Some(Value::from(*n)),
            Self::UInt(n) => Some(Value::from(*n)),
            Self::Float(x) => serde_json::Number::from_f64(*x).map(Value::Number),
            Self::Bool(b) => Some(Value::Bool(*b)),
        }
    }

    pub fn is_finite(&self) -> bool {
        match self {
            Self::Float(x) => x.is_finite(),
            _ => true,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::UInt(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for Scalar {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f32> for Scalar {
    fn from(value: f32) -> Self {
        // Widen through the shortest decimal form so 0.3f32 stays 0.3.
        Self::Float(
            value
                .to_string()
                .parse()
                .unwrap_or_else(|_| f64::from(value)),
        )
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

macro_rules! int_scalar {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Scalar {
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

int_scalar!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(Self::UInt(value), Self::Int)
    }
}

impl From<usize> for Scalar {
    fn from(value: usize) -> Self {
        // usize is at most 64 bits on every supported target
        Self::from(value as u64)
    }
}

/// A flat record of named fields, serialized as a JSON object.
///
/// Facades convert their domain types (documents, questions, ...) into
/// records so the field names on the wire are declared in one place.
///
/// ## Examples
///
/// ```rust
/// use txtai_api::Record;
///
/// let doc = Record::new().field("id", "0").field("text", "US tops 5 million confirmed virus cases");
/// assert_eq!(doc.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Option<Scalar>)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.fields.push((name.into(), Some(value.into())));
        self
    }

    /// Appends a field that is serialized as JSON `null` when `value` is `None`.
    pub fn optional_field<T: Into<Scalar>>(mut self, name: impl Into<String>, value: Option<T>) -> Self {
        self.fields.push((name.into(), value.map(Into::into)));
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Scalar>)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_ref()))
    }
}

/// How a blob's multipart part is named and typed when the blob carries no
/// explicit metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobKind {
    /// Generic binary object: parts named `file{i}`, `application/octet-stream`.
    Object,
    /// Image: parts named `image{i}.jpg`, content type from the file extension.
    Image,
}

/// Binary payload for a multipart upload.
#[derive(Debug, Clone, PartialEq)]
pub struct Blob {
    data: Bytes,
    file_name: Option<String>,
    content_type: Option<String>,
}

impl Blob {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            file_name: None,
            content_type: None,
        }
    }

    /// Reads a file into a blob named after the file.
    pub async fn read(path: impl AsRef<Path>) -> Result<Self, MarshalError> {
        let path = path.as_ref();
        let data = tokio::fs::read(path)
            .await
            .map_err(|source| MarshalError::ReadFile {
                path: path.to_path_buf(),
                source,
            })?;

        let blob = Self::new(data);
        Ok(match path.file_name().and_then(|name| name.to_str()) {
            Some(name) => blob.with_file_name(name),
            None => blob,
        })
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// File name of this blob's part when it is at `index` in its list.
    pub fn part_file_name(&self, kind: BlobKind, index: usize) -> String {
        match (&self.file_name, kind) {
            (Some(name), _) => name.clone(),
            (None, BlobKind::Object) => format!("file{index}"),
            (None, BlobKind::Image) => format!("image{index}.jpg"),
        }
    }

    /// Content type of this blob's part.
    pub fn part_content_type(&self, kind: BlobKind, index: usize) -> String {
        if let Some(content_type) = &self.content_type {
            return content_type.clone();
        }

        match kind {
            BlobKind::Object => "application/octet-stream".to_string(),
            BlobKind::Image => image_content_type(&self.part_file_name(kind, index)).to_string(),
        }
    }
}

/// Image content type for a file name, defaulting to JPEG.
pub fn image_content_type(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        _ => "image/jpeg",
    }
}

/// A parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Absent value. Omitted from query strings, JSON bodies and forms.
    Null,
    Scalar(Scalar),
    List(Vec<Scalar>),
    Records(Vec<Record>),
    /// Structured JSON embedded verbatim (JSON encodings only).
    Json(Value),
    /// Binary uploads (multipart encoding only).
    Blobs { kind: BlobKind, blobs: Vec<Blob> },
}

impl ParamValue {
    /// A list of scalars.
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Scalar>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// A list of records.
    pub fn records<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Record>,
    {
        Self::Records(items.into_iter().map(Into::into).collect())
    }

    pub fn blobs(kind: BlobKind, blobs: Vec<Blob>) -> Self {
        Self::Blobs { kind, blobs }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short name of the variant, used in marshaling diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Scalar(_) => "scalar",
            Self::List(_) => "list",
            Self::Records(_) => "record list",
            Self::Json(_) => "json object",
            Self::Blobs { .. } => "blob list",
        }
    }
}

macro_rules! scalar_param {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    Self::Scalar(value.into())
                }
            }
        )*
    };
}

scalar_param!(&str, String, &String, bool, f32, f64, i8, i16, i32, i64, u8, u16, u32, u64, usize);

impl From<Scalar> for ParamValue {
    fn from(value: Scalar) -> Self {
        Self::Scalar(value)
    }
}

/// JSON `null` becomes [`ParamValue::Null`] and is omitted like any other
/// absent parameter.
impl From<Value> for ParamValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            other => Self::Json(other),
        }
    }
}

impl<T: Into<Scalar>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, |v| Self::Scalar(v.into()))
    }
}

/// Ordered parameters of a single call.
///
/// ## Examples
///
/// ```rust
/// use txtai_api::{ParamValue, Params};
///
/// let params = Params::new()
///     .with("query", "feel good story")
///     .with("limit", 10)
///     .with("weights", None::<f32>);
///
/// assert_eq!(params.len(), 3);
/// assert!(params.get("weights").unwrap().is_null());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<(String, ParamValue)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets a parameter. An existing parameter keeps its position and gets the new value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        let name = name.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Parameters that are not [`ParamValue::Null`].
    pub fn present(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.iter().filter(|(_, value)| !value.is_null())
    }
}
