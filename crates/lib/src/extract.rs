//! # Recipe Extractor
//!
//! Sends a local media file to the AI provider and decodes the answer. Model
//! output is best-effort: anything that is not a JSON object after fence
//! stripping is returned as raw text instead of failing the request.

use crate::{
    errors::ParseError,
    providers::ai::{AiProvider, MediaPayload},
    types::ModelOutput,
};
use regex::Regex;
use serde_json::Value;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, info, warn};

static CODE_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mi)^```(?:json)?|```$").expect("valid regex"));

/// Maps a file's extension to the MIME type sent to the model.
///
/// Only image and video types the inference service accepts are recognised;
/// anything else, including files without an extension, is an error.
pub fn detect_mime_type(path: &Path) -> Result<&'static str, ParseError> {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();
    let mime_type = match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "heic" => "image/heic",
        "heif" => "image/heif",
        "mp4" | "m4v" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        "mpeg" | "mpg" => "video/mpeg",
        "avi" => "video/x-msvideo",
        "3gp" => "video/3gpp",
        "wmv" => "video/x-ms-wmv",
        "flv" => "video/x-flv",
        "mkv" => "video/x-matroska",
        _ => return Err(ParseError::MimeDetection(path.display().to_string())),
    };
    Ok(mime_type)
}

/// Removes markdown code fences wrapped around a JSON body.
///
/// An opening fence (optionally tagged `json`) is removed at the start of any
/// line and a closing fence at the end of any line.
pub fn strip_code_fences(text: &str) -> String {
    CODE_FENCE_RE
        .replace_all(text.trim(), "")
        .trim()
        .to_string()
}

/// Decodes model text into a JSON object, falling back to the raw text.
pub fn parse_model_output(text: &str) -> ModelOutput {
    let cleaned = strip_code_fences(text);
    match serde_json::from_str::<Value>(&cleaned) {
        Ok(Value::Object(fields)) => ModelOutput::Structured(fields),
        Ok(other) => {
            warn!(
                "Model output decoded to a non-object JSON value ({}), keeping raw text.",
                json_kind(&other)
            );
            ModelOutput::Unstructured {
                raw_response: text.to_string(),
            }
        }
        Err(e) => {
            warn!("Error parsing model output as JSON: {}", e);
            ModelOutput::Unstructured {
                raw_response: text.to_string(),
            }
        }
    }
}

/// Runs the extraction prompt against the media file at `path`.
pub async fn extract_recipe(
    ai_provider: &dyn AiProvider,
    path: &Path,
    prompt: &str,
) -> Result<ModelOutput, ParseError> {
    let mime_type = detect_mime_type(path)?;
    let data = tokio::fs::read(path).await?;
    info!(mime_type, bytes = data.len(), "Sending media to AI provider");

    let media = MediaPayload::new(mime_type, data);
    let raw = ai_provider.generate(prompt, &media).await?;
    debug!("<-- Model raw output: {}", raw);

    Ok(parse_model_output(&raw))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
