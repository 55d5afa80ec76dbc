// src/utils/text.rs

use std::sync::LazyLock;

use regex::Regex;

static QUESTION_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\s*(\d+)\s*\.?\s*\]").expect("static regex"));

/// Ignored at the end of a label.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ':', ';', '?', '!'];

/// Folds accented Latin letters to their base letter.
fn fold_accent(ch: char) -> char {
    match ch {
        'Á' | 'À' | 'Ä' | 'Â' | 'Ã' | 'á' | 'à' | 'ä' | 'â' | 'ã' => 'A',
        'É' | 'È' | 'Ë' | 'Ê' | 'é' | 'è' | 'ë' | 'ê' => 'E',
        'Í' | 'Ì' | 'Ï' | 'Î' | 'í' | 'ì' | 'ï' | 'î' => 'I',
        'Ó' | 'Ò' | 'Ö' | 'Ô' | 'Õ' | 'ó' | 'ò' | 'ö' | 'ô' | 'õ' => 'O',
        'Ú' | 'Ù' | 'Ü' | 'Û' | 'ú' | 'ù' | 'ü' | 'û' => 'U',
        'Ñ' | 'ñ' => 'N',
        'Ç' | 'ç' => 'C',
        other => other,
    }
}

/// Normalizes a header or answer-key label for comparison.
///
/// Accents are folded to base letters, everything is upper-cased, runs of
/// whitespace collapse to one space and the ends are trimmed. The question
/// suffix is rewritten to `[N.]` and trailing punctuation is dropped, so
/// `" Matemáticas  [3] :"` and `"MATEMATICAS [3.]"` compare equal.
pub fn normalize_label(s: &str) -> String {
    let folded: String = s
        .chars()
        .map(fold_accent)
        .flat_map(char::to_uppercase)
        .collect();
    let collapsed = folded.split_whitespace().collect::<Vec<_>>().join(" ");
    let canonical = QUESTION_SUFFIX.replace_all(&collapsed, "[$1.]");
    canonical
        .trim_end_matches(|c: char| TRAILING_PUNCTUATION.contains(&c) || c.is_whitespace())
        .to_string()
}

/// Cleans a chosen option or an official answer: trim, upper-case,
/// drop one trailing period. `" b. "` becomes `"B"`.
pub fn clean_answer(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    match upper.strip_suffix('.') {
        Some(stripped) => stripped.trim_end().to_string(),
        None => upper,
    }
}

/// Keeps only the ASCII digits of a respondent identifier.
pub fn clean_respondent_id(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_folds_accents_case_and_spacing() {
        assert_eq!(normalize_label(" Matemáticas  [3.] "), "MATEMATICAS [3.]");
        assert_eq!(normalize_label("LECTURA CRÍTICA [10.]"), "LECTURA CRITICA [10.]");
        assert_eq!(normalize_label("inglés\t[1.]"), "INGLES [1.]");
        assert_eq!(normalize_label(""), "");
    }

    #[test]
    fn normalize_canonicalizes_question_suffix_and_trailing_punctuation() {
        assert_eq!(normalize_label("Matemáticas [1]"), "MATEMATICAS [1.]");
        assert_eq!(normalize_label("MATEMÁTICAS [ 12 . ]"), "MATEMATICAS [12.]");
        assert_eq!(normalize_label("Inglés [4.]:"), "INGLES [4.]");
        assert_eq!(normalize_label("Ciencias Naturales [2.] ?"), "CIENCIAS NATURALES [2.]");
        assert_eq!(normalize_label("Documento."), "DOCUMENTO");
    }

    #[test]
    fn clean_answer_strips_single_trailing_period() {
        assert_eq!(clean_answer(" b. "), "B");
        assert_eq!(clean_answer("c"), "C");
        assert_eq!(clean_answer("A.."), "A.");
        assert_eq!(clean_answer("   "), "");
    }

    #[test]
    fn respondent_id_keeps_digits_only() {
        assert_eq!(clean_respondent_id("1.023.456-7"), "10234567");
        assert_eq!(clean_respondent_id("CC 98765"), "98765");
        assert_eq!(clean_respondent_id("abc"), "");
    }
}
