//! # Upload Fetcher
//!
//! Downloads an uploaded object from storage into a temporary local file. The
//! file keeps the key's extension because MIME detection downstream works from
//! the extension on disk.

use crate::{errors::ParseError, providers::storage::ObjectStorage};
use std::path::Path;
use tempfile::{Builder, NamedTempFile};
use tokio::io::AsyncWriteExt;
use tracing::info;

/// The extension used when the key has none.
pub const FALLBACK_EXTENSION: &str = ".bin";

/// A downloaded upload backed by a temporary file.
///
/// The file is deleted when this value is dropped.
#[derive(Debug)]
pub struct FetchedUpload {
    key: String,
    size: usize,
    file: NamedTempFile,
}

impl FetchedUpload {
    /// The storage key the file was downloaded from.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Path of the temporary file on local disk.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Number of bytes written.
    pub fn size(&self) -> usize {
        self.size
    }
}

/// Returns the extension of `key` including the leading dot, or
/// [`FALLBACK_EXTENSION`] when the key has none.
pub fn extension_for_key(key: &str) -> String {
    Path::new(key)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_else(|| FALLBACK_EXTENSION.to_string())
}

/// Downloads `key` from storage and writes it to a fresh temporary file.
///
/// Nothing is written to disk when the download fails.
pub async fn fetch_upload(
    storage: &dyn ObjectStorage,
    key: &str,
) -> Result<FetchedUpload, ParseError> {
    let bytes = storage.download(key).await?;

    let suffix = extension_for_key(key);
    let file = Builder::new()
        .prefix("upload-")
        .suffix(&suffix)
        .tempfile()?;
    let mut writer = tokio::fs::File::from_std(file.reopen()?);
    writer.write_all(&bytes).await?;
    writer.flush().await?;

    info!(
        key,
        bytes = bytes.len(),
        path = %file.path().display(),
        "Fetched upload into temporary file"
    );

    Ok(FetchedUpload {
        key: key.to_string(),
        size: bytes.len(),
        file,
    })
}
