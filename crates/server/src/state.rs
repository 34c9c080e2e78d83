//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the logic
//! for building it at startup. The state is read-only after construction and
//! is cloned cheaply into every request handler.

use crate::config::AppConfig;
use recipe_lens::{
    providers::{
        ai::gemini::GeminiProvider, db::supabase::SupabaseTable,
        storage::supabase::SupabaseStorage,
    },
    RecipePipeline, RecipePipelineBuilder,
};
use std::sync::Arc;
use tracing::info;

/// The shared application state, accessible from all request handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// The application's configuration, resolved once at startup.
    pub config: Arc<AppConfig>,
    /// The upload parsing pipeline with its provider clients.
    pub pipeline: Arc<RecipePipeline>,
}

/// Builds the shared application state from the configuration.
///
/// This instantiates the storage, inference and datastore clients and wires
/// them into a single `RecipePipeline`.
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let supabase = &config.supabase;

    let storage = SupabaseStorage::with_path_template(
        supabase.url.clone(),
        supabase.storage_bucket.clone(),
        supabase.storage_path_template.clone(),
    )?;

    let api_url = config.gemini.endpoint();
    info!(model = %config.gemini.model_name, "Configuring Gemini provider with URL: {}", api_url);
    let ai_provider = GeminiProvider::new(api_url, config.gemini.api_key.clone())?;

    let store = SupabaseTable::new(
        supabase.url.clone(),
        supabase.service_key.clone(),
        supabase.recipes_table.clone(),
    )?
    .with_upsert_on_upload_id(supabase.upsert_on_upload_id);
    info!(
        table = %supabase.recipes_table,
        upsert = supabase.upsert_on_upload_id,
        "Initialized recipe store (Supabase)."
    );

    let mut builder = RecipePipelineBuilder::new()
        .storage(Box::new(storage))
        .ai_provider(Box::new(ai_provider))
        .store(Box::new(store));
    if let Some(prompt) = &config.extraction_prompt {
        info!("Using extraction prompt override from configuration.");
        builder = builder.prompt(prompt.clone());
    }

    Ok(AppState {
        config: Arc::new(config),
        pipeline: Arc::new(builder.build()?),
    })
}

impl AppState {
    /// Builds a state around an already assembled pipeline.
    pub fn new(config: AppConfig, pipeline: RecipePipeline) -> Self {
        Self {
            config: Arc::new(config),
            pipeline: Arc::new(pipeline),
        }
    }
}
