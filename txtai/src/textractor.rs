//! Text extraction from documents.

use serde_json::Value;
use txtai_api::{
    ApiError, Binder, Endpoint, EndpointDef, JsonFormat, OpaqueFormat, ParamEncoding, ParamValue,
    Params, ResponseShape,
};

use crate::facade::facade;

const TEXTRACT: Endpoint<OpaqueFormat> =
    Endpoint::new(EndpointDef::get("textract", ResponseShape::Opaque));
const BATCHTEXTRACT: Endpoint<JsonFormat<Vec<Value>>> = Endpoint::new(EndpointDef::post(
    "batchtextract",
    ParamEncoding::JsonBody,
    ResponseShape::List,
));

/// Client for a textractor pipeline.
///
/// Files are paths or URLs as seen by the server. Depending on the
/// pipeline's configuration the result is a string or a list of sections.
#[derive(Debug, Clone)]
pub struct Textractor {
    binder: Binder,
}

facade!(Textractor, [TEXTRACT, BATCHTEXTRACT]);

impl Textractor {
    pub async fn textract(&self, file: &str) -> Result<Value, ApiError> {
        let params = Params::new().with("file", file);
        self.binder.bind(TEXTRACT).invoke(params).await
    }

    pub async fn batchtextract<S: AsRef<str>>(&self, files: &[S]) -> Result<Vec<Value>, ApiError> {
        let params = Params::new().with("files", ParamValue::list(files.iter().map(AsRef::as_ref)));
        self.binder.bind(BATCHTEXTRACT).invoke(params).await
    }
}
