//! Abstractive summarization.

use txtai_api::{
    ApiError, Binder, Endpoint, EndpointDef, JsonFormat, ParamEncoding, ParamValue, Params,
    ResponseShape,
};

use crate::facade::facade;

const SUMMARY: Endpoint<JsonFormat<String>> =
    Endpoint::new(EndpointDef::get("summary", ResponseShape::Scalar));
const BATCHSUMMARY: Endpoint<JsonFormat<Vec<String>>> = Endpoint::new(EndpointDef::post(
    "batchsummary",
    ParamEncoding::JsonBody,
    ResponseShape::List,
));

/// Client for a summary pipeline.
///
/// `minlength` and `maxlength` bound the summary length in tokens. Unset
/// bounds are not sent, leaving the model defaults in place.
#[derive(Debug, Clone)]
pub struct Summary {
    binder: Binder,
}

facade!(Summary, [SUMMARY, BATCHSUMMARY]);

impl Summary {
    pub async fn summary(
        &self,
        text: &str,
        minlength: Option<usize>,
        maxlength: Option<usize>,
    ) -> Result<String, ApiError> {
        let params = Params::new()
            .with("text", text)
            .with("minlength", minlength)
            .with("maxlength", maxlength);
        self.binder.bind(SUMMARY).invoke(params).await
    }

    /// Summarizes each of `texts`. Results are aligned with `texts`.
    pub async fn batchsummary<S: AsRef<str>>(
        &self,
        texts: &[S],
        minlength: Option<usize>,
        maxlength: Option<usize>,
    ) -> Result<Vec<String>, ApiError> {
        let params = Params::new()
            .with("texts", ParamValue::list(texts.iter().map(AsRef::as_ref)))
            .with("minlength", minlength)
            .with("maxlength", maxlength);
        self.binder.bind(BATCHSUMMARY).invoke(params).await
    }
}
