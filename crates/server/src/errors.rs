use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use recipe_lens::ParseError;
use serde_json::json;
use tracing::error;

/// The client-facing message for a failed storage fetch.
pub const FETCH_FAILED_DETAIL: &str = "Failed to fetch file from storage";

/// A custom error type for the server application.
///
/// This enum encapsulates different kinds of errors that can occur within the server,
/// allowing them to be converted into appropriate HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Errors originating from the `recipe_lens` pipeline.
    Parse(ParseError),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

/// Conversion from `ParseError` to `AppError`.
impl From<ParseError> for AppError {
    fn from(err: ParseError) -> Self {
        AppError::Parse(err)
    }
}

/// Conversion from `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, detail) = match self {
            AppError::Parse(err) => {
                // Log the original error for debugging purposes
                error!("ParseError: {:?}", err);
                match err {
                    // Only storage failures are reported as the caller's problem.
                    ParseError::UpstreamFetch(_) => {
                        (StatusCode::BAD_REQUEST, FETCH_FAILED_DETAIL.to_string())
                    }
                    ParseError::MimeDetection(path) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Could not determine MIME type for {path}"),
                    ),
                    ParseError::AiRequest(e) => (
                        StatusCode::BAD_GATEWAY,
                        format!("Request to AI provider failed: {e}"),
                    ),
                    ParseError::AiDeserialization(e) => (
                        StatusCode::BAD_GATEWAY,
                        format!("Failed to deserialize AI provider response: {e}"),
                    ),
                    ParseError::AiApi(e) => {
                        (StatusCode::BAD_GATEWAY, format!("AI provider error: {e}"))
                    }
                    ParseError::DatastoreRequest(e) => (
                        StatusCode::BAD_GATEWAY,
                        format!("Request to datastore failed: {e}"),
                    ),
                    ParseError::DatastoreApi(e) => {
                        (StatusCode::BAD_GATEWAY, format!("Datastore error: {e}"))
                    }
                    ParseError::MissingAiProvider
                    | ParseError::MissingObjectStorage
                    | ParseError::MissingRecipeStore
                    | ParseError::InvalidStorageUrl(_)
                    | ParseError::ReqwestClientBuild(_) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Server is not configured correctly.".to_string(),
                    ),
                    ParseError::Io(_) | ParseError::Json(_) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "An internal server error occurred.".to_string(),
                    ),
                }
            }
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "detail": detail,
        }));

        (status_code, body).into_response()
    }
}
