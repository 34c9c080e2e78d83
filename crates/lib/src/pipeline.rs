use crate::{
    errors::ParseError,
    extract::extract_recipe,
    fetch::fetch_upload,
    prompts::RECIPE_EXTRACTION_PROMPT,
    providers::{ai::AiProvider, db::RecipeStore, storage::ObjectStorage},
    recipe::Recipe,
    types::{ParseRequest, ParseResponse},
};
use std::fmt;
use tracing::info;

/// Runs fetch → extract → normalize → persist for one upload.
///
/// Holds no per-request state; a single instance is shared by all requests.
#[derive(Clone)]
pub struct RecipePipeline {
    pub(crate) storage: Box<dyn ObjectStorage>,
    pub(crate) ai_provider: Box<dyn AiProvider>,
    pub(crate) store: Box<dyn RecipeStore>,
    pub(crate) prompt: String,
}

impl fmt::Debug for RecipePipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecipePipeline")
            .field("store", &self.store.name())
            .field("prompt_len", &self.prompt.len())
            .finish_non_exhaustive()
    }
}

impl RecipePipeline {
    /// Processes a parse request end to end.
    ///
    /// A storage failure returns before any inference call or insert. The
    /// temporary file is removed before the insert is attempted, whatever the
    /// outcome of extraction.
    pub async fn run(&self, request: &ParseRequest) -> Result<ParseResponse, ParseError> {
        info!(upload_id = %request.upload_id, key = %request.file_url, "[pipeline] Fetching upload.");
        let output = {
            let upload = fetch_upload(self.storage.as_ref(), &request.file_url).await?;
            info!(upload_id = %request.upload_id, "[pipeline] Extracting recipe.");
            extract_recipe(self.ai_provider.as_ref(), upload.path(), &self.prompt).await?
        };

        let recipe = Recipe::normalize(&output);
        info!(
            upload_id = %request.upload_id,
            structured = output.is_structured(),
            title = %recipe.title,
            ingredients = recipe.ingredient_list().len(),
            "[pipeline] Persisting recipe."
        );

        let record = recipe.clone().into_record(request.upload_id.clone());
        let supabase_result = self.store.insert_recipe(&record).await?;

        Ok(ParseResponse {
            recipe,
            supabase_result,
            gemini_raw: output,
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

/// A builder for creating `RecipePipeline` instances.
#[derive(Default)]
pub struct RecipePipelineBuilder {
    storage: Option<Box<dyn ObjectStorage>>,
    ai_provider: Option<Box<dyn AiProvider>>,
    store: Option<Box<dyn RecipeStore>>,
    prompt: Option<String>,
}

impl RecipePipelineBuilder {
    /// Creates a new `RecipePipelineBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the object storage uploads are fetched from.
    pub fn storage(mut self, storage: Box<dyn ObjectStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Sets the AI provider used for extraction.
    pub fn ai_provider(mut self, ai_provider: Box<dyn AiProvider>) -> Self {
        self.ai_provider = Some(ai_provider);
        self
    }

    /// Sets the store recipes are written to.
    pub fn store(mut self, store: Box<dyn RecipeStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Overrides the default extraction prompt.
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Builds the `RecipePipeline`.
    ///
    /// Fails if any of the three providers has not been set.
    pub fn build(self) -> Result<RecipePipeline, ParseError> {
        Ok(RecipePipeline {
            storage: self.storage.ok_or(ParseError::MissingObjectStorage)?,
            ai_provider: self.ai_provider.ok_or(ParseError::MissingAiProvider)?,
            store: self.store.ok_or(ParseError::MissingRecipeStore)?,
            prompt: self
                .prompt
                .unwrap_or_else(|| RECIPE_EXTRACTION_PROMPT.to_string()),
        })
    }
}
