//! Ranked results.
//!
//! Servers return ranked results as `{"id": ..., "score": ...}` objects.
//! Older servers return `[id, score]` pairs instead; both forms decode to the
//! same types. Ordering is whatever the server sent.

use serde::{Deserialize, Deserializer, Serialize};

/// A document id and its relevance score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RankedRepr<DocumentId>")]
pub struct SearchResult {
    pub id: String,
    pub score: f64,
}

/// A position into a caller-supplied list and its score.
///
/// Returned by similarity and labeling calls: `id` indexes the candidate
/// texts (or labels) sent with the request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RankedRepr<usize>")]
pub struct IndexResult {
    pub id: usize,
    pub score: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RankedRepr<I> {
    Object { id: I, score: f64 },
    Pair(I, f64),
}

impl<I> RankedRepr<I> {
    fn into_parts(self) -> (I, f64) {
        match self {
            Self::Object { id, score } | Self::Pair(id, score) => (id, score),
        }
    }
}

impl From<RankedRepr<DocumentId>> for SearchResult {
    fn from(repr: RankedRepr<DocumentId>) -> Self {
        let (id, score) = repr.into_parts();
        Self { id: id.0, score }
    }
}

impl From<RankedRepr<usize>> for IndexResult {
    fn from(repr: RankedRepr<usize>) -> Self {
        let (id, score) = repr.into_parts();
        Self { id, score }
    }
}

/// A document id as either a JSON string or a JSON number.
struct DocumentId(String);

impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        string_or_number(deserializer).map(Self)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Text(String),
    Number(serde_json::Number),
}

/// Deserializes a JSON string or number into a `String`.
///
/// Document ids are strings on the wire unless the index was built with
/// numeric ids. Usable with `#[serde(deserialize_with = "...")]`.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Text(text) => text,
        StringOrNumber::Number(number) => number.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_result_object_form() {
        let results: Vec<SearchResult> =
            serde_json::from_str(r#"[{"id": "4", "score": 0.68}, {"id": "1", "score": 0.12}]"#)
                .unwrap();
        assert_eq!(results[0].id, "4");
        assert_eq!(results[1].score, 0.12);
    }

    #[test]
    fn test_search_result_numeric_id() {
        let result: SearchResult = serde_json::from_str(r#"{"id": 7, "score": 1.0}"#).unwrap();
        assert_eq!(result.id, "7");
    }

    #[test]
    fn test_search_result_pair_form() {
        let result: SearchResult = serde_json::from_str(r#"["doc", 0.25]"#).unwrap();
        assert_eq!(
            result,
            SearchResult {
                id: "doc".into(),
                score: 0.25
            }
        );
    }

    #[test]
    fn test_index_result_both_forms() {
        let results: Vec<IndexResult> =
            serde_json::from_str(r#"[{"id": 2, "score": 0.9}, [0, 0.4]]"#).unwrap();
        assert_eq!(results[0], IndexResult { id: 2, score: 0.9 });
        assert_eq!(results[1], IndexResult { id: 0, score: 0.4 });
    }

    #[test]
    fn test_index_result_rejects_text_id() {
        let result = serde_json::from_str::<IndexResult>(r#"{"id": "two", "score": 0.9}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serializes_as_object() {
        let json = serde_json::to_value(IndexResult { id: 1, score: 0.5 }).unwrap();
        assert_eq!(json, serde_json::json!({"id": 1, "score": 0.5}));
    }

    #[test]
    fn test_string_or_number_field() {
        #[derive(Deserialize)]
        struct Deleted(#[serde(deserialize_with = "string_or_number")] String);

        let ids: Vec<Deleted> = serde_json::from_str(r#"["a", 5]"#).unwrap();
        let ids: Vec<String> = ids.into_iter().map(|d| d.0).collect();
        assert_eq!(ids, vec!["a", "5"]);
    }
}
