// src/engine/evaluator.rs

use crate::{
    models::{answer_key::AnswerKey, response::QuestionDetail, response::RawResponseRow},
    utils::text::clean_answer,
};

use super::columns::BoundColumn;

/// The only options a respondent can pick.
pub const VALID_OPTIONS: [&str; 4] = ["A", "B", "C", "D"];

fn is_valid_option(value: &str) -> bool {
    VALID_OPTIONS.iter().any(|option| *option == value)
}

/// Per-question outcome of one respondent in one subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub details: Vec<QuestionDetail>,
    pub correct_count: u32,

    /// Longest run of consecutive correct answers, by question number.
    pub max_streak: u32,
}

impl Evaluation {
    pub fn total_questions(&self) -> u32 {
        self.details.len() as u32
    }

    pub fn errors(&self) -> u32 {
        self.total_questions() - self.correct_count
    }
}

/// Grades one retained row against the official answers.
///
/// `columns` must already be sorted by question number. A column without an
/// official answer is unscored: never correct, `correct_answer` is `None`.
/// Empty answers and anything outside `A`..`D` are incorrect.
pub fn evaluate(row: &RawResponseRow, columns: &[BoundColumn], key: &AnswerKey) -> Evaluation {
    let mut details = Vec::with_capacity(columns.len());
    let mut correct_count = 0;
    let mut streak = 0;
    let mut max_streak = 0;

    for column in columns {
        let value = clean_answer(row.get(&column.header));
        let correct_answer = column
            .key_label
            .as_deref()
            .and_then(|label| key.answer_for(label))
            .map(clean_answer);

        let is_correct =
            matches!(&correct_answer, Some(expected) if is_valid_option(&value) && *expected == value);

        if is_correct {
            correct_count += 1;
            streak += 1;
            max_streak = max_streak.max(streak);
        } else {
            streak = 0;
        }

        details.push(QuestionDetail {
            id: column
                .key_label
                .clone()
                .unwrap_or_else(|| column.header.clone()),
            number: column.number,
            value,
            correct_answer,
            is_correct,
        });
    }

    Evaluation {
        details,
        correct_count,
        max_streak,
    }
}
