//! # Configuration Tests
//!
//! This file contains tests for the configuration loading logic. Environment
//! variables are a shared, global resource, so every test is marked `#[serial]`.

use recipe_lens_server::config::{get_config, ConfigError};
use serial_test::serial;
use std::{env, fs::File, io::Write};
use tempfile::{tempdir, TempDir};

const ENV_VARS: &[&str] = &[
    "PORT",
    "SUPABASE_URL",
    "SUPABASE_SERVICE_KEY",
    "SUPABASE_STORAGE_BUCKET",
    "GEMINI_API_KEY",
    "GEMINI_MODEL",
    "CORS_ALLOWED_ORIGINS",
    "RECIPE_LENS_SUPABASE__RECIPES_TABLE",
    "RECIPE_LENS_EXTRACTION_PROMPT",
    "TEST_SUPABASE_KEY",
];

/// A helper function to clear all environment variables used by `get_config`.
/// This ensures a clean slate before each test runs.
fn clear_env_vars() {
    for var in ENV_VARS {
        env::remove_var(var);
    }
}

fn set_required_env_vars() {
    env::set_var("SUPABASE_URL", "https://project.supabase.co");
    env::set_var("SUPABASE_SERVICE_KEY", "service-key");
    env::set_var("GEMINI_API_KEY", "gemini-key");
}

fn write_config(content: &str) -> (TempDir, String) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.yml");
    let mut file = File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    let path = path.to_str().unwrap().to_string();
    (dir, path)
}

#[test]
#[serial]
fn test_get_config_defaults_from_env() {
    clear_env_vars();
    set_required_env_vars();

    let config = get_config(None).expect("Configuration should load successfully");

    assert_eq!(config.port, 8000);
    assert_eq!(config.supabase.url, "https://project.supabase.co");
    assert_eq!(config.supabase.service_key, "service-key");
    assert_eq!(config.supabase.storage_bucket, "uploads");
    assert_eq!(
        config.supabase.storage_path_template,
        "/storage/v1/object/{bucket}/{key}"
    );
    assert_eq!(config.supabase.recipes_table, "recipes");
    assert!(!config.supabase.upsert_on_upload_id);
    assert_eq!(config.gemini.api_key, "gemini-key");
    assert_eq!(config.gemini.model_name, "gemini-2.5-flash-preview-05-20");
    assert_eq!(
        config.gemini.endpoint(),
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash-preview-05-20:generateContent"
    );
    assert_eq!(config.cors_allowed_origins, vec!["http://localhost:3000"]);
    assert!(config.extraction_prompt.is_none());

    clear_env_vars();
}

#[test]
#[serial]
fn test_get_config_well_known_env_vars() {
    clear_env_vars();
    set_required_env_vars();
    env::set_var("PORT", "9999");
    env::set_var("SUPABASE_STORAGE_BUCKET", "meal-media");
    env::set_var("GEMINI_MODEL", "gemini-2.0-flash");
    env::set_var(
        "CORS_ALLOWED_ORIGINS",
        "https://app.example.com, http://localhost:5173",
    );

    let config = get_config(None).expect("Configuration should load successfully");

    assert_eq!(config.port, 9999);
    assert_eq!(config.supabase.storage_bucket, "meal-media");
    assert_eq!(config.gemini.model_name, "gemini-2.0-flash");
    assert_eq!(
        config.cors_allowed_origins,
        vec!["https://app.example.com", "http://localhost:5173"]
    );

    clear_env_vars();
}

#[test]
#[serial]
fn test_get_config_from_yaml_with_substitution() {
    clear_env_vars();
    env::set_var("TEST_SUPABASE_KEY", "substituted-key");
    let (_dir, path) = write_config(
        r#"
port: 9100
supabase:
  url: "http://localhost:54321"
  service_key: "${TEST_SUPABASE_KEY}"
  recipes_table: "meal_recipes"
  upsert_on_upload_id: true
gemini:
  api_key: "yaml-gemini-key"
  api_url: "http://localhost:8089/generate"
cors_allowed_origins: ["*"]
extraction_prompt: "Return only JSON."
"#,
    );

    let config = get_config(Some(&path)).expect("Configuration should load successfully");

    assert_eq!(config.port, 9100);
    assert_eq!(config.supabase.service_key, "substituted-key");
    assert_eq!(config.supabase.recipes_table, "meal_recipes");
    assert_eq!(config.supabase.storage_bucket, "uploads");
    assert!(config.supabase.upsert_on_upload_id);
    assert_eq!(config.gemini.endpoint(), "http://localhost:8089/generate");
    assert_eq!(config.cors_allowed_origins, vec!["*"]);
    assert_eq!(
        config.extraction_prompt.as_deref(),
        Some("Return only JSON.")
    );

    clear_env_vars();
}

#[test]
#[serial]
fn test_env_vars_override_yaml() {
    clear_env_vars();
    env::set_var("GEMINI_API_KEY", "env-gemini-key");
    env::set_var("RECIPE_LENS_SUPABASE__RECIPES_TABLE", "env_recipes");
    let (_dir, path) = write_config(
        r#"
supabase:
  url: "http://localhost:54321"
  service_key: "yaml-key"
  recipes_table: "yaml_recipes"
gemini:
  api_key: "yaml-gemini-key"
"#,
    );

    let config = get_config(Some(&path)).expect("Configuration should load successfully");

    assert_eq!(config.gemini.api_key, "env-gemini-key");
    assert_eq!(config.supabase.recipes_table, "env_recipes");
    assert_eq!(config.supabase.service_key, "yaml-key");

    clear_env_vars();
}

#[test]
#[serial]
fn test_empty_env_var_is_ignored() {
    clear_env_vars();
    set_required_env_vars();
    env::set_var("GEMINI_MODEL", "");

    let config = get_config(None).expect("Configuration should load successfully");

    assert_eq!(config.gemini.model_name, "gemini-2.5-flash-preview-05-20");

    clear_env_vars();
}

#[test]
#[serial]
fn test_get_config_missing_required_value() {
    clear_env_vars();
    env::set_var("SUPABASE_URL", "https://project.supabase.co");
    env::set_var("GEMINI_API_KEY", "gemini-key");
    // SUPABASE_SERVICE_KEY is intentionally not set.

    let result = get_config(None);

    assert!(matches!(result, Err(ConfigError::General(_))));
    let message = result.unwrap_err().to_string();
    assert!(message.contains("service_key"), "unexpected error: {message}");

    clear_env_vars();
}

#[test]
#[serial]
fn test_get_config_override_path_not_found() {
    clear_env_vars();
    set_required_env_vars();

    let result = get_config(Some("/nonexistent/recipe-lens/config.yml"));

    assert!(matches!(result, Err(ConfigError::NotFound(_))));

    clear_env_vars();
}
