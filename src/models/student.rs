// src/models/student.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{response::QuestionDetail, subject::Subject};

/// Scored outcome of one student in one subject.
/// Always rebuilt from the question details, never patched in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectResult {
    pub subject_key: Subject,

    /// Curved score in `[0, 100]`.
    pub score: u32,

    pub errors: u32,
    pub correct_count: u32,
    pub max_streak: u32,
    pub total_questions: u32,
    pub question_details: Vec<QuestionDetail>,
}

/// One respondent across every subject they answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    /// Respondent identifier, digits only, at least 5 characters.
    pub id: String,
    pub name: String,
    pub email: String,

    /// May hold fewer than five subjects when sources were missing.
    pub areas: BTreeMap<Subject, SubjectResult>,

    /// Weighted composite in `[0, 500]`.
    pub global_score: u32,
}
