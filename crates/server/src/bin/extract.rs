//! # extract: run recipe extraction on a local file
//!
//! Sends a local image or video to Gemini with the recipe extraction prompt and
//! prints the normalized recipe. Nothing is fetched from storage or written to
//! the recipes table.

use anyhow::Result;
use clap::Parser;
use recipe_lens::{
    extract::extract_recipe,
    prompts::RECIPE_EXTRACTION_PROMPT,
    providers::ai::gemini::{GeminiProvider, DEFAULT_GEMINI_MODEL},
    Recipe,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a meal photo or video
    path: PathBuf,
    /// The Gemini model to use
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    model: String,
    /// The Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: String,
    /// Print the decoded model output instead of the normalized recipe
    #[arg(long)]
    raw: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();
    info!(path = %cli.path.display(), model = %cli.model, "Extracting recipe from local file");

    let provider = GeminiProvider::for_model(&cli.model, cli.api_key)?;
    let output = extract_recipe(&provider, &cli.path, RECIPE_EXTRACTION_PROMPT).await?;

    if cli.raw {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let recipe = Recipe::normalize(&output);
    println!("{}", serde_json::to_string_pretty(&recipe)?);

    let ingredients = recipe.ingredient_list();
    if !ingredients.is_empty() {
        eprintln!("\n{} ({} ingredients)", recipe.title, ingredients.len());
        for ingredient in ingredients {
            eprintln!("  - {}: {}", ingredient.name, ingredient.amount);
        }
    }

    Ok(())
}
