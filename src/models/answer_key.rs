// src/models/answer_key.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::subject::Subject;

/// Official answers for one subject.
///
/// Maps a question label (e.g. `"MATEMÁTICAS [3.]"`) to the correct option letter.
/// Authored externally and never modified by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerKey {
    pub entries: BTreeMap<String, String>,
}

impl AnswerKey {
    /// Looks up the official answer by its original (non-normalized) label.
    pub fn answer_for(&self, label: &str) -> Option<&str> {
        self.entries.get(label).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AnswerKey {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        AnswerKey {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// The answer-key document: one `AnswerKey` per subject.
///
/// JSON shape: `{ "matematicas": { "MATEMÁTICAS [1.]": "A", ... }, ... }`.
/// Unknown subject keys make the whole document invalid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerKeySet {
    pub subjects: BTreeMap<Subject, AnswerKey>,
}

impl AnswerKeySet {
    pub fn get(&self, subject: Subject) -> Option<&AnswerKey> {
        self.subjects.get(&subject)
    }
}
