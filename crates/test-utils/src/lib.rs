use async_trait::async_trait;
use recipe_lens::errors::ParseError;
use recipe_lens::providers::{
    ai::{AiProvider, MediaPayload},
    db::RecipeStore,
    storage::ObjectStorage,
};
use recipe_lens::RecipeRecord;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};

// --- Mock AI Provider ---

/// A recorded call to [`MockAiProvider`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AiCall {
    pub prompt: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

#[derive(Clone, Debug)]
pub struct MockAiProvider {
    responses: Arc<Mutex<HashMap<String, String>>>,
    default_response: Arc<Mutex<Option<String>>>,
    calls: Arc<Mutex<Vec<AiCall>>>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            default_response: Arc::new(Mutex::new(None)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Creates a provider that answers every prompt with `response`.
    pub fn with_response(response: &str) -> Self {
        let provider = Self::new();
        provider.set_default_response(response);
        provider
    }

    /// Pre-programs a response for a specific prompt.
    /// The key should be a unique substring of the prompt.
    pub fn add_response(&self, key: &str, response: &str) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(key.to_string(), response.to_string());
    }

    /// Sets the response used when no keyed response matches.
    pub fn set_default_response(&self, response: &str) {
        *self.default_response.lock().unwrap() = Some(response.to_string());
    }

    /// Retrieves the recorded calls for assertion.
    pub fn get_calls(&self) -> Vec<AiCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockAiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(&self, prompt: &str, media: &MediaPayload) -> Result<String, ParseError> {
        self.calls.lock().unwrap().push(AiCall {
            prompt: prompt.to_string(),
            mime_type: media.mime_type.clone(),
            data: media.data.clone(),
        });

        let responses = self.responses.lock().unwrap();
        for (key, response) in responses.iter() {
            if prompt.contains(key) {
                return Ok(response.clone());
            }
        }

        self.default_response
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| {
                ParseError::AiApi(format!(
                    "MockAiProvider: No response programmed for prompt. Got: '{prompt}'"
                ))
            })
    }
}

// --- Mock Object Storage ---

#[derive(Clone, Debug, Default)]
pub struct MockObjectStorage {
    objects: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    downloads: Arc<Mutex<Vec<String>>>,
}

impl MockObjectStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `data` under `key`.
    pub fn add_object(&self, key: &str, data: &[u8]) {
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), data.to_vec());
    }

    /// Keys that were requested, in order.
    pub fn get_downloads(&self) -> Vec<String> {
        self.downloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStorage for MockObjectStorage {
    fn object_url(&self, key: &str) -> String {
        format!("mock://uploads/{key}")
    }

    async fn download(&self, key: &str) -> Result<Vec<u8>, ParseError> {
        self.downloads.lock().unwrap().push(key.to_string());
        self.objects
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| {
                ParseError::UpstreamFetch(format!(
                    "storage responded with status 404 Not Found for '{key}'"
                ))
            })
    }
}

// --- Mock Recipe Store ---

/// An in-memory recipes table. Every insert appends a row with a fresh id.
#[derive(Clone, Debug, Default)]
pub struct MockRecipeStore {
    rows: Arc<Mutex<Vec<RecipeRecord>>>,
}

impl MockRecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieves the inserted rows for assertion.
    pub fn get_rows(&self) -> Vec<RecipeRecord> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecipeStore for MockRecipeStore {
    fn name(&self) -> &str {
        "Mock"
    }

    async fn insert_recipe(&self, record: &RecipeRecord) -> Result<Value, ParseError> {
        let mut rows = self.rows.lock().unwrap();
        rows.push(record.clone());
        let mut row = serde_json::to_value(record)?;
        row["id"] = json!(rows.len());
        Ok(Value::Array(vec![row]))
    }
}
