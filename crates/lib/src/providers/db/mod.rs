pub mod supabase;

use crate::{errors::ParseError, recipe::RecipeRecord};
use async_trait::async_trait;
use dyn_clone::DynClone;
use serde_json::Value;
use std::fmt::Debug;

/// A trait for persisting normalized recipes to a remote table.
///
/// The pipeline only ever inserts; it never reads rows back, updates them,
/// or deletes them.
#[async_trait]
pub trait RecipeStore: Send + Sync + Debug + DynClone {
    /// Returns the name of the store (e.g., "Supabase").
    fn name(&self) -> &str;

    /// Inserts one recipe row and returns the datastore's result payload.
    async fn insert_recipe(&self, record: &RecipeRecord) -> Result<Value, ParseError>;
}

dyn_clone::clone_trait_object!(RecipeStore);
