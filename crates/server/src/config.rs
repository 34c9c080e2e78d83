//! # Application Configuration
//!
//! This module defines the configuration structure for the `recipe-lens-server`
//! and the logic for loading it once at startup from programmatic defaults, an
//! optional `config.yml` file and environment variables. The resolved
//! `AppConfig` is passed explicitly into `build_app_state`.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use recipe_lens::providers::{
    ai::gemini::{generate_content_url, DEFAULT_GEMINI_MODEL},
    db::supabase::DEFAULT_RECIPES_TABLE,
    storage::supabase::{DEFAULT_STORAGE_BUCKET, DEFAULT_STORAGE_PATH_TEMPLATE},
};
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fs;
use tracing::info;

/// The configuration file picked up from the working directory when no
/// explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.yml";

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates a required configuration file was not found.
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    pub port: u16,
    /// Object storage and recipes table settings.
    pub supabase: SupabaseConfig,
    /// Inference service settings.
    pub gemini: GeminiConfig,
    /// Origins allowed by the CORS layer. Loaded from `CORS_ALLOWED_ORIGINS`
    /// (comma separated).
    pub cors_allowed_origins: Vec<String>,
    /// Replaces the built-in extraction prompt when set.
    #[serde(default)]
    pub extraction_prompt: Option<String>,
}

/// Settings for Supabase storage and the recipes table.
#[derive(Debug, Deserialize, Clone)]
pub struct SupabaseConfig {
    /// The project base URL. Loaded from `SUPABASE_URL`.
    pub url: String,
    /// The service key used for table inserts. Loaded from `SUPABASE_SERVICE_KEY`.
    pub service_key: String,
    /// Loaded from `SUPABASE_STORAGE_BUCKET`.
    pub storage_bucket: String,
    /// Object path under `url`. Placeholders: `{bucket}`, `{key}`.
    pub storage_path_template: String,
    pub recipes_table: String,
    /// Upsert on `upload_id` instead of inserting a new row per request.
    #[serde(default)]
    pub upsert_on_upload_id: bool,
}

/// Settings for the Gemini inference service.
#[derive(Debug, Deserialize, Clone)]
pub struct GeminiConfig {
    /// Loaded from `GEMINI_API_KEY`.
    pub api_key: String,
    /// Loaded from `GEMINI_MODEL`.
    pub model_name: String,
    /// Overrides the endpoint derived from `model_name`.
    #[serde(default)]
    pub api_url: Option<String>,
}

impl GeminiConfig {
    /// The `generateContent` endpoint to call.
    pub fn endpoint(&self) -> String {
        self.api_url
            .clone()
            .unwrap_or_else(|| generate_content_url(&self.model_name))
    }
}

// Helper to read a file, substitute env vars, and return its content.
// Returns Ok(None) if the file does not exist, or an error if it fails to read.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
        .map_err(|e| ConfigError::General(format!("Invalid substitution pattern: {e}")))?;
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_default()
    });

    Ok(Some(expanded_content.to_string()))
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// Loads the application configuration.
///
/// Layers, lowest priority first:
/// 1. Programmatic defaults.
/// 2. The YAML file at `config_path_override`, or `config.yml` in the working
///    directory if present. `${VAR}` references are substituted from the environment.
/// 3. Nested overrides via `RECIPE_LENS_...` variables (e.g., `RECIPE_LENS_SUPABASE__RECIPES_TABLE`).
/// 4. Well-known variables: `PORT`, `SUPABASE_URL`, `SUPABASE_SERVICE_KEY`,
///    `SUPABASE_STORAGE_BUCKET`, `GEMINI_API_KEY`, `GEMINI_MODEL`, `CORS_ALLOWED_ORIGINS`.
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    // Layer 1: Programmatic defaults.
    let mut builder = ConfigBuilder::builder()
        .set_default("port", 8000)?
        .set_default("supabase.storage_bucket", DEFAULT_STORAGE_BUCKET)?
        .set_default("supabase.storage_path_template", DEFAULT_STORAGE_PATH_TEMPLATE)?
        .set_default("supabase.recipes_table", DEFAULT_RECIPES_TABLE)?
        .set_default("supabase.upsert_on_upload_id", false)?
        .set_default("gemini.model_name", DEFAULT_GEMINI_MODEL)?
        .set_default("cors_allowed_origins", vec!["http://localhost:3000"])?;

    // Layer 2: Config file.
    match config_path_override {
        Some(path) => {
            let content = read_and_substitute(path)?.ok_or_else(|| {
                ConfigError::NotFound(format!("Config file not found at '{path}'."))
            })?;
            info!("Loading configuration from '{path}'.");
            builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
        }
        None => {
            if let Some(content) = read_and_substitute(DEFAULT_CONFIG_FILE)? {
                info!("Loading configuration from '{DEFAULT_CONFIG_FILE}'.");
                builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
            }
        }
    }

    // Layer 3: Prefixed environment variables for nested overrides.
    builder = builder.add_source(
        Environment::with_prefix("RECIPE_LENS")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // Layer 4: Well-known environment variables, applied as overrides.
    let cors_origins = env_var("CORS_ALLOWED_ORIGINS").map(|origins| {
        origins
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect::<Vec<_>>()
    });
    let settings = builder
        .set_override_option("port", env_var("PORT"))?
        .set_override_option("supabase.url", env_var("SUPABASE_URL"))?
        .set_override_option("supabase.service_key", env_var("SUPABASE_SERVICE_KEY"))?
        .set_override_option("supabase.storage_bucket", env_var("SUPABASE_STORAGE_BUCKET"))?
        .set_override_option("gemini.api_key", env_var("GEMINI_API_KEY"))?
        .set_override_option("gemini.model_name", env_var("GEMINI_MODEL"))?
        .set_override_option("cors_allowed_origins", cors_origins)?
        .build()?;

    // Missing required fields (URL, keys) surface here rather than at call time.
    let config: AppConfig = settings.try_deserialize()?;
    Ok(config)
}
