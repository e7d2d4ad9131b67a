//! Similarity ranking of candidate texts.
//!
//! The same two endpoints are also served by embeddings indexes, so the
//! calls are shared with [`Embeddings`](crate::Embeddings).

use txtai_api::{
    ApiError, Binder, Endpoint, EndpointDef, IndexResult, JsonFormat, ParamEncoding, ParamValue,
    Params, ResponseShape,
};

use crate::facade::facade;

pub(crate) const SIMILARITY: Endpoint<JsonFormat<Vec<IndexResult>>> = Endpoint::new(
    EndpointDef::post("similarity", ParamEncoding::JsonBody, ResponseShape::Ranked),
);
pub(crate) const BATCHSIMILARITY: Endpoint<JsonFormat<Vec<Vec<IndexResult>>>> = Endpoint::new(
    EndpointDef::post("batchsimilarity", ParamEncoding::JsonBody, ResponseShape::RankedBatch),
);

/// Client for a similarity pipeline.
#[derive(Debug, Clone)]
pub struct Similarity {
    binder: Binder,
}

facade!(Similarity, [SIMILARITY, BATCHSIMILARITY]);

impl Similarity {
    /// Ranks `texts` by similarity to `query`, best first.
    ///
    /// Each result's `id` is the position of the text in `texts`.
    pub async fn similarity<S: AsRef<str>>(
        &self,
        query: &str,
        texts: &[S],
    ) -> Result<Vec<IndexResult>, ApiError> {
        similarity(&self.binder, query, texts).await
    }

    /// Ranks `texts` against each of `queries`. Results are aligned with `queries`.
    pub async fn batchsimilarity<Q: AsRef<str>, S: AsRef<str>>(
        &self,
        queries: &[Q],
        texts: &[S],
    ) -> Result<Vec<Vec<IndexResult>>, ApiError> {
        batchsimilarity(&self.binder, queries, texts).await
    }
}

pub(crate) async fn similarity<S: AsRef<str>>(
    binder: &Binder,
    query: &str,
    texts: &[S],
) -> Result<Vec<IndexResult>, ApiError> {
    let params = Params::new()
        .with("query", query)
        .with("texts", ParamValue::list(texts.iter().map(AsRef::as_ref)));
    binder.bind(SIMILARITY).invoke(params).await
}

pub(crate) async fn batchsimilarity<Q: AsRef<str>, S: AsRef<str>>(
    binder: &Binder,
    queries: &[Q],
    texts: &[S],
) -> Result<Vec<Vec<IndexResult>>, ApiError> {
    let params = Params::new()
        .with("queries", ParamValue::list(queries.iter().map(AsRef::as_ref)))
        .with("texts", ParamValue::list(texts.iter().map(AsRef::as_ref)));
    binder.bind(BATCHSIMILARITY).invoke(params).await
}
