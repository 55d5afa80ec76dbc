// src/engine/mod.rs

//! The answer-ingestion and scoring pipeline.
//!
//! raw table -> [`tabular`] -> [`identity`] + [`columns`] -> [`dedup`] ->
//! [`evaluator`] -> [`curve`] -> [`assembler`] (with [`global`] and [`cohort`]).
//!
//! Everything here is synchronous and free of side effects apart from
//! logging. [`ingest`] is the only async entry point and only awaits the
//! source loads, which all finish before any subject is scored.

pub mod assembler;
pub mod cohort;
pub mod columns;
pub mod curve;
pub mod dedup;
pub mod evaluator;
pub mod global;
pub mod identity;
pub mod tabular;

use chrono::{DateTime, Utc};

use crate::{
    error::IngestError,
    models::{
        Subject,
        answer_key::AnswerKey,
        report::{Report, SubjectRunStats},
        student::SubjectResult,
    },
    sources::SourceLoader,
    utils::text::clean_answer,
};

use assembler::{RunContext, ScoredRespondent, SubjectOutcome};

/// Everything needed to score one subject.
#[derive(Debug, Clone)]
pub struct SubjectInput {
    pub subject: Subject,

    /// Raw CSV text, or why it could not be loaded.
    pub table: Result<String, IngestError>,

    /// `None` when the answer-key document has no entry for the subject.
    pub answer_key: Option<AnswerKey>,
}

/// Scores every subject and assembles the report.
///
/// A failing subject is skipped and reported as a warning. The run itself
/// fails only when no subject produced results.
pub fn score_subjects(
    mut inputs: Vec<SubjectInput>,
    test_name: &str,
    generated_at: DateTime<Utc>,
) -> Result<Report, IngestError> {
    inputs.sort_by_key(|input| input.subject);

    let mut outcomes = Vec::new();
    let mut skipped = Vec::new();
    let mut warnings = Vec::new();

    for input in inputs {
        let subject = input.subject;
        match score_subject(input, &mut warnings) {
            Ok(outcome) => {
                tracing::info!(
                    %subject,
                    students = outcome.respondents.len(),
                    duplicates = outcome.stats.duplicates_discarded,
                    invalid = outcome.stats.invalid_rows,
                    "Subject scored"
                );
                outcomes.push(outcome);
            }
            Err(err) => {
                tracing::warn!(%subject, "Skipping subject: {}", err);
                warnings.push(err.to_string());
                skipped.push(subject);
            }
        }
    }

    if outcomes.is_empty() {
        return Err(IngestError::NoUsableInput);
    }

    Ok(assembler::assemble(
        outcomes,
        RunContext {
            test_name: test_name.to_string(),
            generated_at,
            skipped,
            warnings,
        },
    ))
}

/// Runs the pipeline for one subject. Degradations are pushed onto `warnings`.
pub fn score_subject(
    input: SubjectInput,
    warnings: &mut Vec<String>,
) -> Result<SubjectOutcome, IngestError> {
    let subject = input.subject;
    let mut warn = |err: IngestError| {
        tracing::warn!(%subject, "{}", err);
        warnings.push(err.to_string());
    };

    let text = input.table?;
    let table = tabular::parse_table(&text).map_err(|e| IngestError::MalformedTable {
        subject,
        reason: e.to_string(),
    })?;

    let identity = identity::detect_identity(&table.headers)
        .ok_or(IngestError::MissingIdentityColumn { subject })?;

    let key = input.answer_key.unwrap_or_default();
    for (label, value) in &key.entries {
        let cleaned = clean_answer(value);
        if !evaluator::VALID_OPTIONS.iter().any(|option| *option == cleaned) {
            warn(IngestError::InvalidKeyValue {
                subject,
                label: label.clone(),
                value: value.clone(),
            });
        }
    }

    let binding = columns::bind_columns(&table.headers, subject, &key);
    if binding.columns.is_empty() {
        return Err(IngestError::NoQuestionColumns { subject });
    }
    if !binding.key_matched {
        warn(IngestError::MissingAnswerKey {
            subject,
            unscored: binding.columns.len(),
        });
    }

    let deduped = dedup::deduplicate(&table.rows, &identity);
    if deduped.rows.is_empty() {
        return Err(IngestError::NoRespondents { subject });
    }

    let respondents: Vec<ScoredRespondent> = deduped
        .rows
        .iter()
        .map(|retained| {
            let eval = evaluator::evaluate(retained.row, &binding.columns, &key);
            let total = eval.total_questions();
            let result = SubjectResult {
                subject_key: subject,
                score: curve::score_curve(eval.correct_count, eval.max_streak, total),
                errors: eval.errors(),
                correct_count: eval.correct_count,
                max_streak: eval.max_streak,
                total_questions: total,
                question_details: eval.details,
            };
            ScoredRespondent {
                id: retained.id.clone(),
                name: identity
                    .name
                    .as_deref()
                    .map(|h| retained.row.get(h).to_string())
                    .unwrap_or_default(),
                email: identity
                    .email
                    .as_deref()
                    .map(|h| retained.row.get(h).to_string())
                    .unwrap_or_default(),
                result,
            }
        })
        .collect();

    let stats = SubjectRunStats {
        rows_processed: deduped.stats.rows_processed,
        invalid_rows: deduped.stats.invalid_rows,
        duplicates_discarded: deduped.stats.duplicates_discarded,
        retained: respondents.len(),
        malformed_timestamps: deduped.stats.malformed_timestamps,
        question_columns: binding.columns.len(),
        key_matched_columns: binding
            .columns
            .iter()
            .filter(|c| c.key_label.is_some())
            .count(),
    };

    Ok(SubjectOutcome {
        subject,
        respondents,
        stats,
    })
}

/// Loads every subject through `source`, then scores them.
///
/// An unreadable answer-key document fails the run before any table is read.
/// A table that cannot be loaded only skips its subject.
pub async fn ingest(
    source: &dyn SourceLoader,
    test_name: &str,
    generated_at: DateTime<Utc>,
) -> Result<Report, IngestError> {
    let keys = source.load_answer_keys().await?;

    let mut inputs = Vec::new();
    for subject in source.subjects() {
        let table = source.load_table(subject).await;
        inputs.push(SubjectInput {
            subject,
            table,
            answer_key: keys.get(subject).cloned(),
        });
    }

    score_subjects(inputs, test_name, generated_at)
}
