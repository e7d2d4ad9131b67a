//! Named server-side workflows.

use serde_json::Value;
use txtai_api::{
    ApiError, Binder, Endpoint, EndpointDef, JsonFormat, ParamEncoding, Params, ResponseShape,
};

use crate::facade::facade;

const WORKFLOW: Endpoint<JsonFormat<Vec<Value>>> = Endpoint::new(EndpointDef::post(
    "workflow",
    ParamEncoding::JsonBody,
    ResponseShape::List,
));

/// Client for workflows configured on the server.
///
/// ## Examples
///
/// ```rust,ignore
/// use serde_json::json;
/// use txtai::{Facade, Workflow};
///
/// let workflow = Workflow::new("http://localhost:8000")?;
/// let outputs = workflow
///     .workflow("sumfrench", &[json!("https://github.com/neuml/txtai")])
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct Workflow {
    binder: Binder,
}

facade!(Workflow, [WORKFLOW]);

impl Workflow {
    /// Runs workflow `name` over `elements`. Outputs are aligned with `elements`.
    pub async fn workflow(&self, name: &str, elements: &[Value]) -> Result<Vec<Value>, ApiError> {
        let params = Params::new()
            .with("name", name)
            .with("elements", Value::Array(elements.to_vec()));
        self.binder.bind(WORKFLOW).invoke(params).await
    }
}
