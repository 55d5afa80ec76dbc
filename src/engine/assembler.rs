// src/engine/assembler.rs

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};

use crate::models::{
    Subject,
    report::{Report, ReportMetadata, SubjectRunStats},
    student::{StudentRecord, SubjectResult},
};

use super::{cohort::cohort_analytics, global::global_score_for};

/// One respondent's scored result in one subject, before merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredRespondent {
    pub id: String,
    pub name: String,
    pub email: String,
    pub result: SubjectResult,
}

/// Everything one subject contributed to a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectOutcome {
    pub subject: Subject,
    pub respondents: Vec<ScoredRespondent>,
    pub stats: SubjectRunStats,
}

/// Run-level context that is not derived from the tables.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub test_name: String,
    pub generated_at: DateTime<Utc>,
    pub skipped: Vec<Subject>,
    pub warnings: Vec<String>,
}

/// Merges per-subject outcomes into the published payload.
///
/// Students sharing an ID become one record; the first non-empty name and
/// email win. Students are listed in order of first appearance.
pub fn assemble(outcomes: Vec<SubjectOutcome>, ctx: RunContext) -> Report {
    let mut students: Vec<StudentRecord> = Vec::new();
    let mut index_of: HashMap<String, usize> = HashMap::new();
    let mut subjects = Vec::with_capacity(outcomes.len());
    let mut stats = BTreeMap::new();

    for outcome in outcomes {
        subjects.push(outcome.subject);
        stats.insert(outcome.subject, outcome.stats);

        for respondent in outcome.respondents {
            let slot = *index_of.entry(respondent.id.clone()).or_insert_with(|| {
                students.push(StudentRecord {
                    id: respondent.id.clone(),
                    name: String::new(),
                    email: String::new(),
                    areas: BTreeMap::new(),
                    global_score: 0,
                });
                students.len() - 1
            });

            let record = &mut students[slot];
            if record.name.is_empty() {
                record.name = respondent.name;
            }
            if record.email.is_empty() {
                record.email = respondent.email;
            }
            record.areas.insert(outcome.subject, respondent.result);
        }
    }

    for student in &mut students {
        student.global_score = global_score_for(&student.areas);
    }

    let cohort = subjects
        .iter()
        .map(|&subject| (subject, cohort_analytics(&students, subject)))
        .collect();

    tracing::info!(
        students = students.len(),
        subjects = subjects.len(),
        skipped = ctx.skipped.len(),
        "Report assembled"
    );

    Report {
        metadata: ReportMetadata {
            test_name: ctx.test_name,
            generated_at: ctx.generated_at,
            total_students: students.len(),
            subjects,
            skipped_subjects: ctx.skipped,
            warnings: ctx.warnings,
            stats,
        },
        students,
        cohort_analytics: cohort,
    }
}
