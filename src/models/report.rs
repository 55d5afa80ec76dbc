// src/models/report.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{
    analytics::QuestionStat, answer_key::AnswerKeySet, student::StudentRecord, subject::Subject,
};

/// Cohort statistics of one subject, keyed by question id.
pub type SubjectAnalytics = BTreeMap<String, QuestionStat>;

/// The payload handed to every external consumer (UI, export, spreadsheet sync).
/// Treat as read-only once published.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub students: Vec<StudentRecord>,
    pub metadata: ReportMetadata,
    pub cohort_analytics: BTreeMap<Subject, SubjectAnalytics>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub test_name: String,
    pub generated_at: DateTime<Utc>,
    pub total_students: usize,

    /// Subjects that produced results, in processing order.
    pub subjects: Vec<Subject>,
    pub skipped_subjects: Vec<Subject>,
    pub warnings: Vec<String>,
    pub stats: BTreeMap<Subject, SubjectRunStats>,
}

/// Row bookkeeping for one subject. Observability only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectRunStats {
    pub rows_processed: usize,
    pub invalid_rows: usize,
    pub duplicates_discarded: usize,
    pub retained: usize,
    pub malformed_timestamps: usize,
    pub question_columns: usize,
    pub key_matched_columns: usize,
}

/// Short answer returned by the ingestion endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestSummary {
    pub test_name: String,
    pub generated_at: DateTime<Utc>,
    pub total_students: usize,
    pub subjects: Vec<Subject>,
    pub skipped_subjects: Vec<Subject>,
    pub warnings: Vec<String>,
}

impl From<&Report> for IngestSummary {
    fn from(report: &Report) -> Self {
        let meta = &report.metadata;
        IngestSummary {
            test_name: meta.test_name.clone(),
            generated_at: meta.generated_at,
            total_students: meta.total_students,
            subjects: meta.subjects.clone(),
            skipped_subjects: meta.skipped_subjects.clone(),
            warnings: meta.warnings.clone(),
        }
    }
}

/// DTO for an ingestion run with tables supplied in the request body.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct IngestRequest {
    #[validate(length(min = 1, max = 120, message = "testName must be between 1 and 120 characters."))]
    pub test_name: String,

    #[serde(default)]
    pub answer_keys: AnswerKeySet,

    /// Raw CSV text per subject.
    #[validate(custom(function = validate_tables))]
    pub tables: BTreeMap<Subject, String>,
}

fn validate_tables(tables: &BTreeMap<Subject, String>) -> Result<(), validator::ValidationError> {
    if tables.is_empty() {
        return Err(validator::ValidationError::new("tables_cannot_be_empty"));
    }
    Ok(())
}
