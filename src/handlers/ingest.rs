// src/handlers/ingest.rs

use axum::{Json, extract::State, response::IntoResponse};
use validator::Validate;

use crate::{
    error::AppError,
    models::report::{IngestRequest, IngestSummary},
    sources::{FsSource, InlineSource},
    state::AppState,
};

/// Runs ingestion against the configured data directory.
///
/// * Reads `answer_keys.json` and one CSV per subject from `DATA_DIR`.
/// * Publishes the new report only if the run succeeds.
/// * Returns a short run summary; the full payload is at `GET /api/report`.
pub async fn run_from_data_dir(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let source = FsSource::new(state.config.data_dir.clone());
    let report = state
        .run_ingestion(&source, &state.config.test_name)
        .await?;

    Ok(Json(IngestSummary::from(report.as_ref())))
}

/// Runs ingestion on tables and answer keys posted in the request body.
pub async fn run_from_payload(
    State(state): State<AppState>,
    Json(payload): Json<IngestRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let source = InlineSource::new(payload.answer_keys, payload.tables);
    let report = state.run_ingestion(&source, &payload.test_name).await?;

    Ok(Json(IngestSummary::from(report.as_ref())))
}
