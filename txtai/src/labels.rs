//! Zero-shot labeling.

use txtai_api::{
    ApiError, Binder, Endpoint, EndpointDef, IndexResult, JsonFormat, ParamEncoding, ParamValue,
    Params, ResponseShape,
};

use crate::facade::facade;

const LABEL: Endpoint<JsonFormat<Vec<IndexResult>>> = Endpoint::new(EndpointDef::post(
    "label",
    ParamEncoding::JsonBody,
    ResponseShape::Ranked,
));
const BATCHLABEL: Endpoint<JsonFormat<Vec<Vec<IndexResult>>>> = Endpoint::new(EndpointDef::post(
    "batchlabel",
    ParamEncoding::JsonBody,
    ResponseShape::RankedBatch,
));

/// Client for a labels pipeline.
///
/// ## Examples
///
/// ```rust,ignore
/// use txtai::{Facade, Labels};
///
/// let labels = Labels::new("http://localhost:8000")?;
/// let tags = ["positive", "negative"];
///
/// let best = labels.label("Great news today", &tags).await?;
/// println!("{}", tags[best[0].id]);
/// ```
#[derive(Debug, Clone)]
pub struct Labels {
    binder: Binder,
}

facade!(Labels, [LABEL, BATCHLABEL]);

impl Labels {
    /// Scores each of `labels` against `text`, best first.
    ///
    /// Each result's `id` is the position of the label in `labels`.
    pub async fn label<S: AsRef<str>>(
        &self,
        text: &str,
        labels: &[S],
    ) -> Result<Vec<IndexResult>, ApiError> {
        let params = Params::new()
            .with("text", text)
            .with("labels", ParamValue::list(labels.iter().map(AsRef::as_ref)));
        self.binder.bind(LABEL).invoke(params).await
    }

    /// Labels each of `texts`. Results are aligned with `texts`.
    pub async fn batchlabel<T: AsRef<str>, S: AsRef<str>>(
        &self,
        texts: &[T],
        labels: &[S],
    ) -> Result<Vec<Vec<IndexResult>>, ApiError> {
        let params = Params::new()
            .with("texts", ParamValue::list(texts.iter().map(AsRef::as_ref)))
            .with("labels", ParamValue::list(labels.iter().map(AsRef::as_ref)));
        self.binder.bind(BATCHLABEL).invoke(params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facade::test_support::connect;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_label_accepts_pair_responses() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/label"))
            .and(body_json(json!({"text": "Great news", "labels": ["positive", "negative"]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([[0, 0.97], [1, 0.03]])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let labels: Labels = connect(&mock_server.uri(), None);
        let results = labels
            .label("Great news", &["positive", "negative"])
            .await
            .unwrap();

        assert_eq!(results[0], IndexResult { id: 0, score: 0.97 });
        assert_eq!(results[1].id, 1);
    }
}
