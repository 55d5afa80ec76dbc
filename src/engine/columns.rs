// src/engine/columns.rs

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use regex::Regex;

use crate::{
    models::{Subject, answer_key::AnswerKey},
    utils::text::normalize_label,
};

/// Headers starting with this marker hold derived feedback, never answers.
pub const FEEDBACK_PREFIX: &str = "FB_";

static QUESTION_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\s*(\d+)\s*\.?\s*\]").expect("static regex"));

/// A data column bound to a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundColumn {
    /// Header exactly as it appears in the table.
    pub header: String,

    pub number: u32,

    /// Original answer-key label used to look up the official answer.
    /// `None` for columns found by the header scan.
    pub key_label: Option<String>,
}

/// Result of matching one table's headers against a subject.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnBinding {
    /// Ordered by question number ascending.
    pub columns: Vec<BoundColumn>,

    /// `true` when at least one column matched an answer-key label.
    pub key_matched: bool,
}

/// Captures `N` from the first `[N.]` in `label`.
pub fn question_number(label: &str) -> Option<u32> {
    QUESTION_NUMBER
        .captures(label)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn is_feedback_column(header: &str) -> bool {
    normalize_label(header).starts_with(FEEDBACK_PREFIX)
}

fn header_pattern(subject: Subject) -> Regex {
    let alternatives = subject
        .header_prefixes()
        .iter()
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!(r"^(?:{alternatives})[^\[]*\[\s*(\d+)\s*\.?\s*\]");
    Regex::new(&pattern).expect("escaped prefixes form a valid regex")
}

/// Binds table headers to the questions of `subject`.
///
/// Headers and key labels are compared after [`normalize_label`]. When two
/// headers normalize to the same label the later header wins. If nothing in
/// the key matches, headers shaped like `PREFIX [N.]` are bound instead
/// (feedback columns excluded). Such a column takes the key label carrying
/// the same question number when exactly one does, and none otherwise.
pub fn bind_columns(headers: &[String], subject: Subject, key: &AnswerKey) -> ColumnBinding {
    let by_normalized: HashMap<String, &str> = key
        .entries
        .keys()
        .map(|label| (normalize_label(label), label.as_str()))
        .collect();

    let mut bound: BTreeMap<&str, &str> = BTreeMap::new();
    for header in headers {
        if let Some(&label) = by_normalized.get(&normalize_label(header)) {
            if let Some(previous) = bound.insert(label, header.as_str()) {
                tracing::warn!(
                    %subject,
                    label,
                    previous,
                    header = header.as_str(),
                    "Several headers match one answer-key label; keeping the last"
                );
            }
        }
    }

    if !bound.is_empty() {
        let columns = bound
            .into_iter()
            .map(|(label, header)| {
                let number = question_number(label).or_else(|| question_number(header));
                (number, label, header)
            })
            .collect::<Vec<_>>();
        return ColumnBinding {
            columns: number_and_sort(columns),
            key_matched: true,
        };
    }

    let mut labels_by_number: HashMap<u32, Option<&str>> = HashMap::new();
    for label in key.entries.keys() {
        if let Some(number) = question_number(label) {
            labels_by_number
                .entry(number)
                .and_modify(|slot| *slot = None)
                .or_insert(Some(label.as_str()));
        }
    }

    let pattern = header_pattern(subject);
    let mut columns: Vec<BoundColumn> = headers
        .iter()
        .filter(|h| !is_feedback_column(h))
        .filter_map(|header| {
            let number = pattern
                .captures(&normalize_label(header))?
                .get(1)?
                .as_str()
                .parse()
                .ok()?;
            let key_label = labels_by_number
                .get(&number)
                .copied()
                .flatten()
                .map(str::to_string);
            Some(BoundColumn {
                header: header.clone(),
                number,
                key_label,
            })
        })
        .collect();
    columns.sort_by_key(|c| c.number);
    let key_matched = columns.iter().any(|c| c.key_label.is_some());

    ColumnBinding {
        columns,
        key_matched,
    }
}

/// Labels without a `[N.]` are numbered after the highest captured number.
fn number_and_sort(mut columns: Vec<(Option<u32>, &str, &str)>) -> Vec<BoundColumn> {
    columns.sort_by_key(|(number, _, _)| (number.is_none(), *number));
    let mut next = columns.iter().filter_map(|(n, _, _)| *n).max().unwrap_or(0);

    columns
        .into_iter()
        .map(|(number, label, header)| {
            let number = number.unwrap_or_else(|| {
                next += 1;
                next
            });
            BoundColumn {
                header: header.to_string(),
                number,
                key_label: Some(label.to_string()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn key(pairs: &[(&str, &str)]) -> AnswerKey {
        pairs.iter().copied().collect()
    }

    #[test]
    fn matches_headers_despite_accents_case_and_spacing() {
        let key = key(&[("MATEMÁTICAS [1.]", "A"), ("MATEMÁTICAS [2.]", "B")]);
        let hs = headers(&["Documento", " matematicas  [2.] ", "Matemáticas [1.]"]);

        let binding = bind_columns(&hs, Subject::Matematicas, &key);

        assert!(binding.key_matched);
        assert_eq!(binding.columns.len(), 2);
        assert_eq!(binding.columns[0].header, "Matemáticas [1.]");
        assert_eq!(binding.columns[0].key_label.as_deref(), Some("MATEMÁTICAS [1.]"));
        assert_eq!(binding.columns[1].number, 2);
        assert_eq!(binding.columns[1].header, " matematicas  [2.] ");
    }

    #[test]
    fn sorts_numerically_not_lexically() {
        let key = key(&[("INGLÉS [10.]", "A"), ("INGLÉS [2.]", "B"), ("INGLÉS [1.]", "C")]);
        let hs = headers(&["INGLÉS [10.]", "INGLÉS [2.]", "INGLÉS [1.]"]);

        let numbers: Vec<u32> = bind_columns(&hs, Subject::Ingles, &key)
            .columns
            .iter()
            .map(|c| c.number)
            .collect();

        assert_eq!(numbers, vec![1, 2, 10]);
    }

    #[test]
    fn later_duplicate_header_wins() {
        let key = key(&[("SOCIALES Y CIUDADANAS [1.]", "D")]);
        let hs = headers(&["Sociales y Ciudadanas [1.]", "SOCIALES Y CIUDADANAS [1.]"]);

        let binding = bind_columns(&hs, Subject::Sociales, &key);

        assert_eq!(binding.columns.len(), 1);
        assert_eq!(binding.columns[0].header, "SOCIALES Y CIUDADANAS [1.]");
    }

    #[test]
    fn unmatched_headers_are_ignored() {
        let key = key(&[("CIENCIAS NATURALES [1.]", "A")]);
        let hs = headers(&["Nombre", "CIENCIAS NATURALES [1.]", "Comentarios"]);

        let binding = bind_columns(&hs, Subject::CienciasNaturales, &key);

        assert_eq!(binding.columns.len(), 1);
    }

    #[test]
    fn falls_back_to_header_scan_and_skips_feedback_columns() {
        let hs = headers(&[
            "Marca temporal",
            "Lectura Crítica [2]",
            "FB_LECTURA CRITICA [1.]",
            "lectura critica [1.]",
            "MATEMÁTICAS [3.]",
        ]);

        let binding = bind_columns(&hs, Subject::LecturaCritica, &AnswerKey::default());

        assert!(!binding.key_matched);
        let found: Vec<(&str, u32)> = binding
            .columns
            .iter()
            .map(|c| (c.header.as_str(), c.number))
            .collect();
        assert_eq!(found, vec![("lectura critica [1.]", 1), ("Lectura Crítica [2]", 2)]);
        assert!(binding.columns.iter().all(|c| c.key_label.is_none()));
    }

    #[test]
    fn header_without_period_binds_to_key_label() {
        let key = key(&[("MATEMÁTICAS [1.]", "A"), ("MATEMÁTICAS [2.]", "B")]);
        let hs = headers(&["Documento", "Matemáticas [1]", "Matemáticas [2]"]);

        let binding = bind_columns(&hs, Subject::Matematicas, &key);

        assert!(binding.key_matched);
        let labels: Vec<Option<&str>> = binding
            .columns
            .iter()
            .map(|c| c.key_label.as_deref())
            .collect();
        assert_eq!(labels, vec![Some("MATEMÁTICAS [1.]"), Some("MATEMÁTICAS [2.]")]);
    }

    #[test]
    fn header_scan_borrows_key_label_by_question_number() {
        let key = key(&[("MATE [1.]", "A"), ("MATE [2.]", "B"), ("OTRA [2.]", "C")]);
        let hs = headers(&["MATEMÁTICAS [1.]", "MATEMÁTICAS [2.]"]);

        let binding = bind_columns(&hs, Subject::Matematicas, &key);

        assert!(binding.key_matched);
        assert_eq!(binding.columns[0].key_label.as_deref(), Some("MATE [1.]"));
        // Two labels carry number 2, so that column stays unscored.
        assert_eq!(binding.columns[1].key_label, None);
    }

    #[test]
    fn fallback_accepts_short_social_studies_prefix() {
        let hs = headers(&["SOCIALES [4.]", "SOCIALES Y CIUDADANAS [3.]"]);

        let binding = bind_columns(&hs, Subject::Sociales, &AnswerKey::default());

        let numbers: Vec<u32> = binding.columns.iter().map(|c| c.number).collect();
        assert_eq!(numbers, vec![3, 4]);
    }

    #[test]
    fn unnumbered_labels_go_last() {
        let key = key(&[("INGLÉS BONUS", "A"), ("INGLÉS [3.]", "B")]);
        let hs = headers(&["INGLÉS BONUS", "INGLÉS [3.]"]);

        let binding = bind_columns(&hs, Subject::Ingles, &key);

        assert_eq!(binding.columns[0].number, 3);
        assert_eq!(binding.columns[1].number, 4);
        assert_eq!(binding.columns[1].header, "INGLÉS BONUS");
    }

    #[test]
    fn question_number_parses_variants() {
        assert_eq!(question_number("X [3.]"), Some(3));
        assert_eq!(question_number("X [ 12 ]"), Some(12));
        assert_eq!(question_number("X"), None);
    }
}
