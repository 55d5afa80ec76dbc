// src/handlers/report.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{
    error::AppError,
    models::{Subject, report::Report},
    state::ReportStore,
    utils::text::clean_respondent_id,
};

async fn published(store: &ReportStore) -> Result<Arc<Report>, AppError> {
    store
        .current()
        .await
        .ok_or(AppError::NotFound("No report has been published yet".to_string()))
}

/// Returns the full published payload.
pub async fn get_report(State(store): State<ReportStore>) -> Result<impl IntoResponse, AppError> {
    let report = published(&store).await?;
    Ok(Json(report.as_ref().clone()))
}

/// Retrieves one student by respondent ID.
/// The path segment is cleaned to digits first, so `1.234.567` finds `1234567`.
pub async fn get_student(
    State(store): State<ReportStore>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let report = published(&store).await?;
    let id = clean_respondent_id(&id);

    let student = report
        .students
        .iter()
        .find(|s| s.id == id)
        .cloned()
        .ok_or(AppError::NotFound("Student not found".to_string()))?;

    Ok(Json(student))
}

/// Cohort statistics for one subject, keyed by question id.
/// Unknown subject keys and subjects missing from the report are both 404.
pub async fn get_subject_analytics(
    State(store): State<ReportStore>,
    Path(subject): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let subject = Subject::from_key(&subject)
        .ok_or_else(|| AppError::NotFound(format!("Unknown subject '{}'", subject)))?;
    let report = published(&store).await?;

    let analytics = report
        .cohort_analytics
        .get(&subject)
        .cloned()
        .ok_or(AppError::NotFound(format!("No analytics for '{}'", subject)))?;

    Ok(Json(analytics))
}

/// Liveness probe.
pub async fn health_check() -> &'static str {
    "Score engine is running"
}
