//! Question answering over a list of texts.

use serde::{Deserialize, Serialize};
use txtai_api::{
    ApiError, Binder, Endpoint, EndpointDef, JsonFormat, ParamEncoding, ParamValue, Params,
    Record, ResponseShape,
};

use crate::facade::facade;

const EXTRACT: Endpoint<JsonFormat<Vec<Answer>>> = Endpoint::new(EndpointDef::post(
    "extract",
    ParamEncoding::JsonBody,
    ResponseShape::List,
));

/// A question to answer.
///
/// `query` selects the texts searched for the answer; when unset the server
/// uses `question`. `snippet` asks for the surrounding sentence instead of
/// the exact answer span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: String,
    pub query: Option<String>,
    pub question: String,
    pub snippet: bool,
}

impl Question {
    pub fn new(name: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            query: None,
            question: question.into(),
            snippet: false,
        }
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn snippet(mut self, snippet: bool) -> Self {
        self.snippet = snippet;
        self
    }
}

impl From<&Question> for Record {
    fn from(question: &Question) -> Self {
        Record::new()
            .field("name", &question.name)
            .optional_field("query", question.query.as_deref())
            .field("question", &question.question)
            .field("snippet", question.snippet)
    }
}

/// An extracted answer, keyed by the question's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "AnswerRepr")]
pub struct Answer {
    pub name: String,
    pub answer: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AnswerRepr {
    Object { name: String, answer: Option<String> },
    Pair(String, Option<String>),
}

impl From<AnswerRepr> for Answer {
    fn from(repr: AnswerRepr) -> Self {
        match repr {
            AnswerRepr::Object { name, answer } | AnswerRepr::Pair(name, answer) => {
                Self { name, answer }
            }
        }
    }
}

/// Answers in server order, which need not match question order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers(Vec<Answer>);

impl Answers {
    /// The answer to the question called `name`, if one was found.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|answer| answer.name == name)
            .and_then(|answer| answer.answer.as_deref())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Answer> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<Answer> {
        self.0
    }
}

impl From<Vec<Answer>> for Answers {
    fn from(answers: Vec<Answer>) -> Self {
        Self(answers)
    }
}

impl IntoIterator for Answers {
    type Item = Answer;
    type IntoIter = std::vec::IntoIter<Answer>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Answers {
    type Item = &'a Answer;
    type IntoIter = std::slice::Iter<'a, Answer>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Client for an extractor pipeline.
///
/// ## Examples
///
/// ```rust,ignore
/// use txtai::{Extractor, Facade, Question};
///
/// let extractor = Extractor::new("http://localhost:8000")?;
/// let answers = extractor
///     .extract(
///         &[Question::new("winner", "Who won the game?").query("game")],
///         &["Red Sox beat the Yankees 5-3"],
///     )
///     .await?;
///
/// println!("{:?}", answers.get("winner"));
/// ```
#[derive(Debug, Clone)]
pub struct Extractor {
    binder: Binder,
}

facade!(Extractor, [EXTRACT]);

impl Extractor {
    /// Answers each question in `queue` from `texts`.
    pub async fn extract<S: AsRef<str>>(
        &self,
        queue: &[Question],
        texts: &[S],
    ) -> Result<Answers, ApiError> {
        let params = Params::new()
            .with("queue", ParamValue::records(queue))
            .with("texts", ParamValue::list(texts.iter().map(AsRef::as_ref)));
        let answers = self.binder.bind(EXTRACT).invoke(params).await?;
        Ok(Answers::from(answers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facade::test_support::connect;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_answer_forms() {
        let answers: Vec<Answer> = serde_json::from_value(json!([
            {"name": "winner", "answer": "Red Sox"},
            ["score", "5-3"],
            {"name": "unknown", "answer": null}
        ]))
        .unwrap();

        let answers = Answers::from(answers);
        assert_eq!(answers.len(), 3);
        assert_eq!(answers.get("score"), Some("5-3"));
        assert_eq!(answers.get("unknown"), None);
        assert_eq!(answers.get("missing"), None);
    }

    #[tokio::test]
    async fn test_extract_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/extract"))
            .and(body_json(json!({
                "queue": [
                    {"name": "winner", "query": "game", "question": "Who won?", "snippet": false},
                    {"name": "where", "query": null, "question": "Where?", "snippet": true}
                ],
                "texts": ["Red Sox beat the Yankees 5-3 at Fenway"]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"name": "where", "answer": "Red Sox beat the Yankees 5-3 at Fenway"},
                {"name": "winner", "answer": "Red Sox"}
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let extractor: Extractor = connect(&mock_server.uri(), None);
        let answers = extractor
            .extract(
                &[
                    Question::new("winner", "Who won?").query("game"),
                    Question::new("where", "Where?").snippet(true),
                ],
                &["Red Sox beat the Yankees 5-3 at Fenway"],
            )
            .await
            .unwrap();

        assert_eq!(answers.get("winner"), Some("Red Sox"));
        assert_eq!(answers.iter().next().map(|a| a.name.as_str()), Some("where"));
    }
}
