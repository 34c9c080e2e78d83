//! # Recipe Normalization
//!
//! Maps the loosely-typed output of the model onto the fixed recipe shape that
//! is persisted and returned. This is normalization, not validation: missing or
//! falsy fields are replaced with defaults and everything else is passed
//! through as-is.

use crate::types::ModelOutput;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The title used when the model did not provide one.
pub const DEFAULT_TITLE: &str = "Recipe";

/// A single ingredient line. `amount` is free text such as "2 cloves".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub amount: String,
}

/// The normalized recipe returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    /// Kept as raw JSON so malformed entries reach the datastore uninspected.
    pub ingredients: Value,
    pub instructions: String,
    pub description: String,
}

/// The row inserted into the recipes table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRecord {
    pub upload_id: String,
    #[serde(flatten)]
    pub recipe: Recipe,
}

impl Default for Recipe {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            ingredients: Value::Array(vec![]),
            instructions: String::new(),
            description: String::new(),
        }
    }
}

impl Recipe {
    /// Applies field-by-field defaults to the model output.
    ///
    /// - `title` falls back to [`DEFAULT_TITLE`].
    /// - `ingredients` falls back to an empty list.
    /// - `instructions` falls back to `steps`, then to an empty string.
    /// - `description` falls back to an empty string.
    ///
    /// Unstructured output yields the all-defaults recipe.
    pub fn normalize(output: &ModelOutput) -> Self {
        let fields = match output {
            ModelOutput::Structured(fields) => fields,
            ModelOutput::Unstructured { .. } => return Self::default(),
        };

        let defaults = Self::default();
        Self {
            title: present(fields, "title")
                .map(as_text)
                .unwrap_or(defaults.title),
            ingredients: present(fields, "ingredients")
                .cloned()
                .unwrap_or(defaults.ingredients),
            instructions: present(fields, "instructions")
                .or_else(|| present(fields, "steps"))
                .map(as_text)
                .unwrap_or(defaults.instructions),
            description: present(fields, "description")
                .map(as_text)
                .unwrap_or(defaults.description),
        }
    }

    /// The ingredients that have the expected `{name, amount}` shape.
    pub fn ingredient_list(&self) -> Vec<Ingredient> {
        self.ingredients
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| serde_json::from_value(item.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Attaches the upload this recipe was extracted from.
    pub fn into_record(self, upload_id: impl Into<String>) -> RecipeRecord {
        RecipeRecord {
            upload_id: upload_id.into(),
            recipe: self,
        }
    }
}

/// Looks up a field, treating falsy JSON values as absent.
fn present<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    fields.get(key).filter(|value| is_truthy(value))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Renders a JSON value as text. A list of steps becomes one line per step.
fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        other => other.to_string(),
    }
}
