pub mod gemini;

use crate::errors::ParseError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// Binary media sent inline alongside an instruction prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPayload {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl MediaPayload {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }
}

/// A trait for interacting with a multimodal AI provider.
///
/// Implementations receive a fixed instructional prompt together with the raw
/// bytes of an image or video and return the model's free-form text answer.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Generates a text response for the given prompt and inline media.
    async fn generate(&self, prompt: &str, media: &MediaPayload) -> Result<String, ParseError>;
}

dyn_clone::clone_trait_object!(AiProvider);
