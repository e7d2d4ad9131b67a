//! Machine translation.

use txtai_api::{
    ApiError, Binder, Endpoint, EndpointDef, JsonFormat, ParamEncoding, ParamValue, Params,
    ResponseShape,
};

use crate::facade::facade;

const TRANSLATE: Endpoint<JsonFormat<String>> =
    Endpoint::new(EndpointDef::get("translate", ResponseShape::Scalar));
const BATCHTRANSLATE: Endpoint<JsonFormat<Vec<String>>> = Endpoint::new(EndpointDef::post(
    "batchtranslate",
    ParamEncoding::JsonBody,
    ResponseShape::List,
));

/// Client for a translation pipeline.
///
/// `target` and `source` are language codes. When `source` is unset the
/// server detects it; when `target` is unset the server default (English)
/// applies.
///
/// ## Examples
///
/// ```rust,ignore
/// use txtai::{Facade, Translation};
///
/// let translation = Translation::new("http://localhost:8000")?;
/// let english = translation.translate("Hola", Some("en"), None).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Translation {
    binder: Binder,
}

facade!(Translation, [TRANSLATE, BATCHTRANSLATE]);

impl Translation {
    pub async fn translate(
        &self,
        text: &str,
        target: Option<&str>,
        source: Option<&str>,
    ) -> Result<String, ApiError> {
        let params = Params::new()
            .with("text", text)
            .with("target", target)
            .with("source", source);
        self.binder.bind(TRANSLATE).invoke(params).await
    }

    /// Translates each of `texts`. Results are aligned with `texts`.
    pub async fn batchtranslate<S: AsRef<str>>(
        &self,
        texts: &[S],
        target: Option<&str>,
        source: Option<&str>,
    ) -> Result<Vec<String>, ApiError> {
        let params = Params::new()
            .with("texts", ParamValue::list(texts.iter().map(AsRef::as_ref)))
            .with("target", target)
            .with("source", source);
        self.binder.bind(BATCHTRANSLATE).invoke(params).await
    }
}
