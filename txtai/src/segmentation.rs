//! Text segmentation.

use serde_json::Value;
use txtai_api::{
    ApiError, Binder, Endpoint, EndpointDef, JsonFormat, OpaqueFormat, ParamEncoding, ParamValue,
    Params, ResponseShape,
};

use crate::facade::facade;

const SEGMENT: Endpoint<OpaqueFormat> =
    Endpoint::new(EndpointDef::get("segment", ResponseShape::Opaque));
const BATCHSEGMENT: Endpoint<JsonFormat<Vec<Value>>> = Endpoint::new(EndpointDef::post(
    "batchsegment",
    ParamEncoding::JsonBody,
    ResponseShape::List,
));

/// Client for a segmentation pipeline.
///
/// The output shape depends on how the pipeline is configured server side
/// (sentences, lines, paragraphs, ...), so results are returned as JSON.
#[derive(Debug, Clone)]
pub struct Segmentation {
    binder: Binder,
}

facade!(Segmentation, [SEGMENT, BATCHSEGMENT]);

impl Segmentation {
    pub async fn segment(&self, text: &str) -> Result<Value, ApiError> {
        let params = Params::new().with("text", text);
        self.binder.bind(SEGMENT).invoke(params).await
    }

    /// Segments each of `texts`. Results are aligned with `texts`.
    pub async fn batchsegment<S: AsRef<str>>(&self, texts: &[S]) -> Result<Vec<Value>, ApiError> {
        let params = Params::new().with("texts", ParamValue::list(texts.iter().map(AsRef::as_ref)));
        self.binder.bind(BATCHSEGMENT).invoke(params).await
    }
}
