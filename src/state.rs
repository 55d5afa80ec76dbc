// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;
use chrono::Utc;
use tokio::sync::{Mutex, RwLock};

use crate::{
    config::Config, engine, error::AppError, models::report::Report, sources::SourceLoader,
};

/// Holds the last published report.
///
/// A report is swapped in whole once a run has finished; readers never see a
/// partially built one. Runs are serialized by `run_lock`.
#[derive(Clone, Default)]
pub struct ReportStore {
    current: Arc<RwLock<Option<Arc<Report>>>>,
    run_lock: Arc<Mutex<()>>,
}

impl ReportStore {
    pub async fn current(&self) -> Option<Arc<Report>> {
        self.current.read().await.clone()
    }

    async fn publish(&self, report: Report) -> Arc<Report> {
        let report = Arc::new(report);
        *self.current.write().await = Some(report.clone());
        report
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub reports: ReportStore,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            reports: ReportStore::default(),
        }
    }

    /// Runs one ingestion and publishes the result.
    ///
    /// A failed run leaves the previously published report untouched. A run
    /// requested while another is in progress is refused.
    pub async fn run_ingestion(
        &self,
        source: &dyn SourceLoader,
        test_name: &str,
    ) -> Result<Arc<Report>, AppError> {
        let _guard = self
            .reports
            .run_lock
            .try_lock()
            .map_err(|_| AppError::Conflict("An ingestion run is already in progress".to_string()))?;

        tracing::info!(test_name, "Ingestion run started");
        let report = engine::ingest(source, test_name, Utc::now()).await?;
        let report = self.reports.publish(report).await;
        tracing::info!(
            students = report.metadata.total_students,
            warnings = report.metadata.warnings.len(),
            "Report published"
        );

        if let Some(path) = &self.config.output_path {
            match serde_json::to_vec_pretty(report.as_ref()) {
                Ok(bytes) => {
                    if let Err(e) = tokio::fs::write(path, bytes).await {
                        tracing::error!("Failed to write report to {}: {:?}", path.display(), e);
                    }
                }
                Err(e) => tracing::error!("Failed to serialize report: {:?}", e),
            }
        }

        Ok(report)
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for ReportStore {
    fn from_ref(state: &AppState) -> Self {
        state.reports.clone()
    }
}
