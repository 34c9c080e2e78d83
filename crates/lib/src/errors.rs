use thiserror::Error;

/// Custom error types for the upload parsing pipeline.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Invalid storage base URL: {0}")]
    InvalidStorageUrl(String),
    #[error("Failed to fetch file from storage: {0}")]
    UpstreamFetch(String),
    #[error("Could not determine MIME type for {0}")]
    MimeDetection(String),
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider returned an error: {0}")]
    AiApi(String),
    #[error("Failed to send request to datastore: {0}")]
    DatastoreRequest(reqwest::Error),
    #[error("Datastore returned an error: {0}")]
    DatastoreApi(String),
    #[error("AI provider is missing")]
    MissingAiProvider,
    #[error("Object storage provider is missing")]
    MissingObjectStorage,
    #[error("Recipe store is missing")]
    MissingRecipeStore,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
