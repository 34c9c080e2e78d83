//! # Recipe Lens
//!
//! This crate turns an uploaded meal photo or video into a structured recipe.
//! A [`RecipePipeline`] fetches the upload from object storage, asks a
//! multimodal model to describe it as JSON, normalizes the answer onto a fixed
//! recipe shape and inserts the result into a remote table.

pub mod errors;
pub mod extract;
pub mod fetch;
pub mod pipeline;
pub mod prompts;
pub mod providers;
pub mod recipe;
pub mod types;

pub use errors::ParseError;
pub use pipeline::{RecipePipeline, RecipePipelineBuilder};
pub use recipe::{Ingredient, Recipe, RecipeRecord};
pub use types::{ModelOutput, ParseRequest, ParseResponse};
