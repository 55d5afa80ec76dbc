// src/models/response.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One respondent's raw record, keyed by header exactly as it appeared in the source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResponseRow {
    pub fields: HashMap<String, String>,
}

impl RawResponseRow {
    /// Value of a column, or `""` when the column is absent.
    pub fn get(&self, header: &str) -> &str {
        self.fields.get(header).map(String::as_str).unwrap_or("")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawResponseRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        RawResponseRow {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// A parsed response table: ordered headers plus ordered rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawResponseRow>,
}

impl ResponseTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Outcome of one question for one respondent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDetail {
    /// Question label; the official answer-key label when one was matched.
    pub id: String,

    /// Question number captured from `[N.]`.
    pub number: u32,

    /// Cleaned answer (upper-cased, trailing period removed). May be empty.
    pub value: String,

    /// `None` when the question has no official answer ("unscored").
    pub correct_answer: Option<String>,

    pub is_correct: bool,
}
