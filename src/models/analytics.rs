// src/models/analytics.rs

use serde::{Deserialize, Serialize};

/// Per-option answer counts for one question.
/// All four options are always present, defaulting to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distractors {
    #[serde(rename = "A")]
    pub a: u32,
    #[serde(rename = "B")]
    pub b: u32,
    #[serde(rename = "C")]
    pub c: u32,
    #[serde(rename = "D")]
    pub d: u32,
}

impl Distractors {
    /// Counts `option` if it is exactly one of `A`..`D`; anything else is ignored.
    pub fn record(&mut self, option: &str) {
        let slot = match option {
            "A" => &mut self.a,
            "B" => &mut self.b,
            "C" => &mut self.c,
            "D" => &mut self.d,
            _ => return,
        };
        *slot += 1;
    }

    pub fn total(&self) -> u32 {
        self.a + self.b + self.c + self.d
    }
}

/// Cohort-level statistics for one question of one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionStat {
    pub question_id: String,
    pub total_attempts: u32,
    pub correct_responses: u32,

    /// Percentage with one decimal place, `0.0` when nobody attempted.
    pub correct_rate: f64,

    pub distractors: Distractors,
}
