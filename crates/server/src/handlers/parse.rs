//! # Upload Parsing Handler
//!
//! Accepts a reference to an uploaded meal photo or video and returns the
//! recipe extracted from it.

use super::{AppError, AppState};
use axum::{extract::State, Json};
use recipe_lens::{ParseRequest, ParseResponse};
use tracing::info;

/// The handler for the `/parse` endpoint.
///
/// Runs the pipeline for one upload. Storage failures are answered with a 400;
/// a model answer that is not valid JSON still produces a 200 with default
/// recipe fields and the raw text under `gemini_raw.raw_response`.
pub async fn parse_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<ParseRequest>,
) -> Result<Json<ParseResponse>, AppError> {
    info!(
        upload_id = %payload.upload_id,
        "Received parse request for file: {}", payload.file_url
    );

    let response = app_state.pipeline.run(&payload).await?;

    info!(upload_id = %payload.upload_id, title = %response.recipe.title, "Recipe saved.");
    Ok(Json(response))
}
