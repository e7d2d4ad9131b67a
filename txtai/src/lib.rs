//! Async client for the txtai API.
//!
//! Each capability of a txtai service is exposed as its own facade:
//!
//! | Facade | Endpoints |
//! |--------|-----------|
//! | [`Embeddings`] | search, add, index, upsert, delete, reindex, count, similarity, transform, object and image uploads |
//! | [`Extractor`] | extract |
//! | [`Labels`] | label, batchlabel |
//! | [`Segmentation`] | segment, batchsegment |
//! | [`Similarity`] | similarity, batchsimilarity |
//! | [`Summary`] | summary, batchsummary |
//! | [`Textractor`] | textract, batchtextract |
//! | [`Transcription`] | transcribe, batchtranscribe |
//! | [`Translation`] | translate, batchtranslate |
//! | [`Workflow`] | workflow |
//!
//! All facades are built through the [`Facade`] trait. The service URL and
//! token are taken from the arguments, falling back to the `TXTAI_API_URL`
//! and `TXTAI_API_TOKEN` environment variables.
//!
//! ## Example
//!
//! ```rust,ignore
//! use txtai::{Embeddings, Facade};
//!
//! let embeddings = Embeddings::new("http://localhost:8000")?;
//!
//! for result in embeddings.search("feel good story", 1).await? {
//!     println!("{} {}", result.id, result.score);
//! }
//! ```

pub mod config;
pub mod embeddings;
pub mod extractor;
pub mod facade;
pub mod labels;
pub mod segmentation;
pub mod similarity;
pub mod summary;
pub mod textractor;
pub mod transcription;
pub mod translation;
pub mod workflow;

pub use config::{Config, ResolvedConfig, TOKEN_VAR, URL_VAR};
pub use embeddings::{Document, Embeddings, SearchOptions};
pub use extractor::{Answer, Answers, Extractor, Question};
pub use facade::Facade;
pub use labels::Labels;
pub use segmentation::Segmentation;
pub use similarity::Similarity;
pub use summary::Summary;
pub use textractor::Textractor;
pub use transcription::Transcription;
pub use translation::Translation;
pub use workflow::Workflow;

pub use txtai_api::{
    ApiError, Blob, ConfigError, DecodeError, IndexResult, MarshalError, SearchResult,
    TransportError,
};
