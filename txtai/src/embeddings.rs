//! Embeddings index: search, indexing and vector transforms.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use txtai_api::response::string_or_number;
use txtai_api::{
    ApiError, Binder, Blob, BlobKind, EmptyFormat, Endpoint, EndpointDef, IndexResult, JsonFormat,
    MarshalError, ParamEncoding, ParamValue, Params, Record, ResponseShape, SearchResult,
};

use crate::facade::facade;
use crate::similarity::{BATCHSIMILARITY, SIMILARITY};

const SEARCH: Endpoint<JsonFormat<Vec<SearchResult>>> =
    Endpoint::new(EndpointDef::get("search", ResponseShape::Ranked));
const BATCHSEARCH: Endpoint<JsonFormat<Vec<Vec<SearchResult>>>> = Endpoint::new(EndpointDef::post(
    "batchsearch",
    ParamEncoding::JsonBody,
    ResponseShape::RankedBatch,
));
const ADD: Endpoint<EmptyFormat> = Endpoint::new(EndpointDef::post(
    "add",
    ParamEncoding::JsonArray,
    ResponseShape::Void,
));
const INDEX: Endpoint<EmptyFormat> =
    Endpoint::new(EndpointDef::get("index", ResponseShape::Void));
const UPSERT: Endpoint<EmptyFormat> =
    Endpoint::new(EndpointDef::get("upsert", ResponseShape::Void));
const DELETE: Endpoint<JsonFormat<Vec<DeletedId>>> = Endpoint::new(EndpointDef::post(
    "delete",
    ParamEncoding::JsonArray,
    ResponseShape::List,
));
const REINDEX: Endpoint<EmptyFormat> = Endpoint::new(EndpointDef::post(
    "reindex",
    ParamEncoding::JsonBody,
    ResponseShape::Void,
));
const COUNT: Endpoint<JsonFormat<u64>> =
    Endpoint::new(EndpointDef::get("count", ResponseShape::Scalar));
const TRANSFORM: Endpoint<JsonFormat<Vec<f64>>> =
    Endpoint::new(EndpointDef::get("transform", ResponseShape::List));
const BATCHTRANSFORM: Endpoint<JsonFormat<Vec<Vec<f64>>>> = Endpoint::new(EndpointDef::post(
    "batchtransform",
    ParamEncoding::JsonArray,
    ResponseShape::ListBatch,
));
const ADDOBJECT: Endpoint<EmptyFormat> = Endpoint::new(EndpointDef::post(
    "addobject",
    ParamEncoding::Multipart,
    ResponseShape::Void,
));
const ADDIMAGE: Endpoint<EmptyFormat> = Endpoint::new(EndpointDef::post(
    "addimage",
    ParamEncoding::Multipart,
    ResponseShape::Void,
));

/// A document to index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: String,
    pub text: String,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

impl From<&Document> for Record {
    fn from(document: &Document) -> Self {
        Record::new()
            .field("id", &document.id)
            .field("text", &document.text)
    }
}

/// Options for [`Embeddings::search_with`] and [`Embeddings::batchsearch_with`].
///
/// `weights` balances dense and sparse scores in hybrid indexes; `index`
/// selects a subindex. Both are left to the server when unset.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    pub limit: usize,
    pub weights: Option<f32>,
    pub index: Option<String>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: 10,
            weights: None,
            index: None,
        }
    }
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn weights(mut self, weights: f32) -> Self {
        self.weights = Some(weights);
        self
    }

    pub fn index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }

    fn apply(&self, params: Params) -> Params {
        params
            .with("limit", self.limit)
            .with("weights", self.weights)
            .with("index", self.index.as_deref())
    }
}

#[derive(Deserialize)]
struct DeletedId(#[serde(deserialize_with = "string_or_number")] String);

/// Client for an embeddings index.
///
/// ## Examples
///
/// ```rust,ignore
/// use txtai::{Document, Embeddings, Facade};
///
/// let embeddings = Embeddings::new("http://localhost:8000")?;
///
/// embeddings
///     .add(&[Document::new("0", "US tops 5 million confirmed virus cases")])
///     .await?;
/// embeddings.index().await?;
///
/// let results = embeddings.search("public health story", 1).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Embeddings {
    binder: Binder,
}

facade!(
    Embeddings,
    [
        SEARCH,
        BATCHSEARCH,
        ADD,
        INDEX,
        UPSERT,
        DELETE,
        REINDEX,
        COUNT,
        SIMILARITY,
        BATCHSIMILARITY,
        TRANSFORM,
        BATCHTRANSFORM,
        ADDOBJECT,
        ADDIMAGE,
    ]
);

impl Embeddings {
    /// Finds the `limit` documents most similar to `query`.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, ApiError> {
        self.search_with(query, &SearchOptions::new().limit(limit))
            .await
    }

    /// Runs a search with hybrid weights or a subindex.
    pub async fn search_with(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<Vec<SearchResult>, ApiError> {
        let params = options.apply(Params::new().with("query", query));
        self.binder.bind(SEARCH).invoke(params).await
    }

    /// Runs one search per query. Results are aligned with `queries`.
    pub async fn batchsearch<S: AsRef<str>>(
        &self,
        queries: &[S],
        limit: usize,
    ) -> Result<Vec<Vec<SearchResult>>, ApiError> {
        self.batchsearch_with(queries, &SearchOptions::new().limit(limit))
            .await
    }

    pub async fn batchsearch_with<S: AsRef<str>>(
        &self,
        queries: &[S],
        options: &SearchOptions,
    ) -> Result<Vec<Vec<SearchResult>>, ApiError> {
        let params = options.apply(
            Params::new().with("queries", ParamValue::list(queries.iter().map(AsRef::as_ref))),
        );
        self.binder.bind(BATCHSEARCH).invoke(params).await
    }

    /// Stages documents for the next [`index`](Self::index) or
    /// [`upsert`](Self::upsert).
    pub async fn add(&self, documents: &[Document]) -> Result<(), ApiError> {
        debug!(documents = documents.len(), "adding documents");
        let params = Params::new().with("documents", ParamValue::records(documents));
        self.binder.bind(ADD).invoke(params).await
    }

    /// Rebuilds the index from the staged documents.
    pub async fn index(&self) -> Result<(), ApiError> {
        self.binder.bind(INDEX).invoke(Params::new()).await
    }

    /// Merges the staged documents into the existing index.
    pub async fn upsert(&self) -> Result<(), ApiError> {
        self.binder.bind(UPSERT).invoke(Params::new()).await
    }

    /// Deletes documents by id and returns the ids that existed.
    pub async fn delete<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<String>, ApiError> {
        let params = Params::new().with("ids", ParamValue::list(ids.iter().map(AsRef::as_ref)));
        let deleted = self.binder.bind(DELETE).invoke(params).await?;
        Ok(deleted.into_iter().map(|id| id.0).collect())
    }

    /// Rebuilds the index with a new configuration.
    ///
    /// `function` names an optional transform applied to each document
    /// before it is re-indexed.
    pub async fn reindex(&self, config: Value, function: Option<&str>) -> Result<(), ApiError> {
        let params = Params::new()
            .with("config", config)
            .with("function", function);
        self.binder.bind(REINDEX).invoke(params).await
    }

    /// Number of documents in the index.
    pub async fn count(&self) -> Result<u64, ApiError> {
        self.binder.bind(COUNT).invoke(Params::new()).await
    }

    /// Ranks `texts` by similarity to `query`.
    pub async fn similarity<S: AsRef<str>>(
        &self,
        query: &str,
        texts: &[S],
    ) -> Result<Vec<IndexResult>, ApiError> {
        crate::similarity::similarity(&self.binder, query, texts).await
    }

    /// Ranks `texts` against each of `queries`.
    pub async fn batchsimilarity<Q: AsRef<str>, S: AsRef<str>>(
        &self,
        queries: &[Q],
        texts: &[S],
    ) -> Result<Vec<Vec<IndexResult>>, ApiError> {
        crate::similarity::batchsimilarity(&self.binder, queries, texts).await
    }

    /// Embeds `text` into a vector.
    pub async fn transform(&self, text: &str) -> Result<Vec<f64>, ApiError> {
        let params = Params::new().with("text", text);
        self.binder.bind(TRANSFORM).invoke(params).await
    }

    pub async fn batchtransform<S: AsRef<str>>(&self, texts: &[S]) -> Result<Vec<Vec<f64>>, ApiError> {
        let params = Params::new().with("texts", ParamValue::list(texts.iter().map(AsRef::as_ref)));
        self.binder.bind(BATCHTRANSFORM).invoke(params).await
    }

    /// Uploads binary objects for indexing.
    ///
    /// `uids`, when given, must pair one id with each blob. `field` names
    /// the document field the objects are stored under.
    pub async fn addobject(
        &self,
        data: Vec<Blob>,
        uids: Option<&[&str]>,
        field: Option<&str>,
    ) -> Result<(), ApiError> {
        let params = upload(BlobKind::Object, data, uids, field)?;
        self.binder.bind(ADDOBJECT).invoke(params).await
    }

    /// Uploads images for indexing. Same contract as [`addobject`](Self::addobject).
    pub async fn addimage(
        &self,
        data: Vec<Blob>,
        uids: Option<&[&str]>,
        field: Option<&str>,
    ) -> Result<(), ApiError> {
        let params = upload(BlobKind::Image, data, uids, field)?;
        self.binder.bind(ADDIMAGE).invoke(params).await
    }
}

fn upload(
    kind: BlobKind,
    data: Vec<Blob>,
    uids: Option<&[&str]>,
    field: Option<&str>,
) -> Result<Params, MarshalError> {
    if let Some(uids) = uids {
        if uids.len() != data.len() {
            return Err(MarshalError::LengthMismatch {
                blobs: data.len(),
                uids: uids.len(),
            });
        }
    }

    debug!(uploads = data.len(), ?kind, "uploading blobs");
    Ok(Params::new()
        .with("data", ParamValue::blobs(kind, data))
        .with("uid", uids.map_or(ParamValue::Null, |ids| ParamValue::list(ids.iter().copied())))
        .with("field", field))
}
