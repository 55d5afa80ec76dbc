// src/engine/identity.rs

use crate::utils::text::normalize_label;

use super::columns::FEEDBACK_PREFIX;

const ID_EXACT: [&str; 8] = [
    "ID",
    "DOCUMENTO",
    "NUMERO DE DOCUMENTO",
    "DOCUMENTO DE IDENTIDAD",
    "IDENTIFICACION",
    "NUMERO DE IDENTIFICACION",
    "CEDULA",
    "TARJETA DE IDENTIDAD",
];
const ID_CONTAINS: [&str; 3] = ["DOCUMENTO", "IDENTIFICACION", "CEDULA"];
const NAME_CONTAINS: [&str; 1] = ["NOMBRE"];
const EMAIL_CONTAINS: [&str; 2] = ["CORREO", "EMAIL"];
const TIMESTAMP_CONTAINS: [&str; 2] = ["MARCA TEMPORAL", "TIMESTAMP"];

/// Which headers carry the respondent's identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityColumns {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub timestamp: Option<String>,
}

/// Picks identity columns out of `headers` by keyword.
///
/// Question columns (anything with `[`) and feedback columns are never
/// considered. Returns `None` when no respondent-ID column exists.
pub fn detect_identity(headers: &[String]) -> Option<IdentityColumns> {
    let candidates: Vec<(&String, String)> = headers
        .iter()
        .map(|h| (h, normalize_label(h)))
        .filter(|(_, n)| !n.contains('[') && !n.starts_with(FEEDBACK_PREFIX))
        .collect();

    let id = find_header(&candidates, |n| ID_EXACT.iter().any(|k| *k == n))
        .or_else(|| find_header(&candidates, |n| ID_CONTAINS.iter().any(|k| n.contains(k))))?;

    let name = find_header(&candidates, |n| NAME_CONTAINS.iter().any(|k| n.contains(k)));
    let email = find_header(&candidates, |n| EMAIL_CONTAINS.iter().any(|k| n.contains(k)));
    let timestamp = find_header(&candidates, |n| {
        n == "FECHA" || TIMESTAMP_CONTAINS.iter().any(|k| n.contains(k))
    });

    Some(IdentityColumns {
        id,
        name,
        email,
        timestamp,
    })
}

fn find_header(candidates: &[(&String, String)], pred: impl Fn(&str) -> bool) -> Option<String> {
    candidates
        .iter()
        .find(|(_, normalized)| pred(normalized.as_str()))
        .map(|(header, _)| (*header).clone())
}
