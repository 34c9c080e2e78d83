pub mod supabase;

use crate::errors::ParseError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for retrieving uploaded objects by key.
#[async_trait]
pub trait ObjectStorage: Send + Sync + Debug + DynClone {
    /// Returns the URL the object would be retrieved from.
    fn object_url(&self, key: &str) -> String;

    /// Downloads the full body of the object stored under `key`.
    ///
    /// Any transport failure or non-success status is reported as
    /// `ParseError::UpstreamFetch`.
    async fn download(&self, key: &str) -> Result<Vec<u8>, ParseError>;
}

dyn_clone::clone_trait_object!(ObjectStorage);
