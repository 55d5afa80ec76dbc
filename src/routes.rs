// src/routes.rs

use axum::{
    Router,
    http::Method,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{ingest, report},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Ingestion routes trigger a run and publish its report.
/// * Read routes serve the last published report; they never see a run in progress.
/// * Applies global middleware (Trace, CORS).
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let ingest_routes = Router::new()
        .route("/", post(ingest::run_from_payload))
        .route("/run", post(ingest::run_from_data_dir));

    let read_routes = Router::new()
        .route("/api/report", get(report::get_report))
        .route("/api/students/{id}", get(report::get_student))
        .route("/api/analytics/{subject}", get(report::get_subject_analytics))
        .route("/api/health", get(report::health_check));

    Router::new()
        .nest("/api/ingest", ingest_routes)
        .merge(read_routes)
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
