use crate::{errors::ParseError, providers::storage::ObjectStorage};
use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, Url};
use tracing::{debug, warn};

/// The bucket used when none is configured.
pub const DEFAULT_STORAGE_BUCKET: &str = "uploads";

/// The object path appended to the storage base URL.
///
/// Placeholders: `{bucket}`, `{key}`
pub const DEFAULT_STORAGE_PATH_TEMPLATE: &str = "/storage/v1/object/{bucket}/{key}";

/// Reads objects from Supabase Storage over plain HTTP GET.
///
/// Keys are opaque: each `/`-separated segment is percent-encoded, so names
/// containing spaces, `#`, `?` or `%` address the object they name.
#[derive(Clone, Debug)]
pub struct SupabaseStorage {
    client: ReqwestClient,
    base_url: Url,
    bucket: String,
    path_template: String,
}

impl SupabaseStorage {
    /// Creates a new `SupabaseStorage` using the default path template.
    pub fn new(base_url: String, bucket: String) -> Result<Self, ParseError> {
        Self::with_path_template(base_url, bucket, DEFAULT_STORAGE_PATH_TEMPLATE.to_string())
    }

    /// Creates a new `SupabaseStorage` with a custom object path template.
    pub fn with_path_template(
        base_url: String,
        bucket: String,
        path_template: String,
    ) -> Result<Self, ParseError> {
        let base_url = Url::parse(&base_url)
            .map_err(|e| ParseError::InvalidStorageUrl(format!("'{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ParseError::InvalidStorageUrl(format!(
                "'{base_url}' cannot carry an object path"
            )));
        }
        let client = ReqwestClient::builder()
            .build()
            .map_err(ParseError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            base_url,
            bucket,
            path_template,
        })
    }

    fn request_url(&self, key: &str) -> Url {
        let path = self
            .path_template
            .replace("{bucket}", &self.bucket)
            .replace("{key}", key);
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(path.trim_start_matches('/').split('/'));
        }
        url
    }
}

#[async_trait]
impl ObjectStorage for SupabaseStorage {
    fn object_url(&self, key: &str) -> String {
        self.request_url(key).to_string()
    }

    async fn download(&self, key: &str) -> Result<Vec<u8>, ParseError> {
        let url = self.request_url(key);
        debug!("--> Fetching object from storage: {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ParseError::UpstreamFetch(format!("request to '{url}' failed: {e}")))?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "Storage returned a non-success status for '{}'", key);
            return Err(ParseError::UpstreamFetch(format!(
                "storage responded with status {} for '{key}'",
                response.status()
            )));
        }

        let bytes = response.bytes().await.map_err(|e| {
            ParseError::UpstreamFetch(format!("failed to read body for '{key}': {e}"))
        })?;

        Ok(bytes.to_vec())
    }
}
