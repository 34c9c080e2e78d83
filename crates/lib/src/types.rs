use crate::recipe::Recipe;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The caller-supplied reference to an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseRequest {
    /// Correlates the result with a prior upload record.
    pub upload_id: String,
    /// Storage-relative key of the uploaded object.
    pub file_url: String,
}

/// What the model returned, after best-effort JSON decoding.
///
/// Serializes as the decoded object, or as `{"raw_response": "..."}` when the
/// text could not be decoded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ModelOutput {
    /// The model's text decoded to a JSON object.
    Structured(Map<String, Value>),
    /// The model's text, verbatim, when it was not a JSON object.
    Unstructured { raw_response: String },
}

impl ModelOutput {
    pub fn is_structured(&self) -> bool {
        matches!(self, ModelOutput::Structured(_))
    }
}

/// The payload returned by a successful pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct ParseResponse {
    pub recipe: Recipe,
    /// The datastore's insert result, echoed verbatim.
    pub supabase_result: Value,
    /// The decoded or raw-fallback model output.
    pub gemini_raw: ModelOutput,
}
