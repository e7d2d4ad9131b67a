//! Speech to text.

use txtai_api::{
    ApiError, Binder, Endpoint, EndpointDef, JsonFormat, ParamEncoding, ParamValue, Params,
    ResponseShape,
};

use crate::facade::facade;

const TRANSCRIBE: Endpoint<JsonFormat<String>> =
    Endpoint::new(EndpointDef::get("transcribe", ResponseShape::Scalar));
const BATCHTRANSCRIBE: Endpoint<JsonFormat<Vec<String>>> = Endpoint::new(EndpointDef::post(
    "batchtranscribe",
    ParamEncoding::JsonBody,
    ResponseShape::List,
));

/// Client for a transcription pipeline. Audio files are read by the server.
#[derive(Debug, Clone)]
pub struct Transcription {
    binder: Binder,
}

facade!(Transcription, [TRANSCRIBE, BATCHTRANSCRIBE]);

impl Transcription {
    pub async fn transcribe(&self, file: &str) -> Result<String, ApiError> {
        let params = Params::new().with("file", file);
        self.binder.bind(TRANSCRIBE).invoke(params).await
    }

    pub async fn batchtranscribe<S: AsRef<str>>(&self, files: &[S]) -> Result<Vec<String>, ApiError> {
        let params = Params::new().with("files", ParamValue::list(files.iter().map(AsRef::as_ref)));
        self.binder.bind(BATCHTRANSCRIBE).invoke(params).await
    }
}
