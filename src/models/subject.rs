// src/models/subject.rs

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the five scored areas of the exam.
///
/// Serialized as the `subjectKey` used throughout the output payload
/// (e.g. `"matematicas"`). Declaration order is the processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    Matematicas,
    LecturaCritica,
    Sociales,
    CienciasNaturales,
    Ingles,
}

impl Subject {
    pub const ALL: [Subject; 5] = [
        Subject::Matematicas,
        Subject::LecturaCritica,
        Subject::Sociales,
        Subject::CienciasNaturales,
        Subject::Ingles,
    ];

    /// Stable key used for file names and JSON map keys.
    pub fn key(self) -> &'static str {
        match self {
            Subject::Matematicas => "matematicas",
            Subject::LecturaCritica => "lectura_critica",
            Subject::Sociales => "sociales",
            Subject::CienciasNaturales => "ciencias_naturales",
            Subject::Ingles => "ingles",
        }
    }

    pub fn from_key(key: &str) -> Option<Subject> {
        Subject::ALL.into_iter().find(|s| s.key() == key.trim())
    }

    /// Question label prefix as authored in answer keys, e.g. `MATEMÁTICAS [3.]`.
    pub fn label_prefix(self) -> &'static str {
        match self {
            Subject::Matematicas => "MATEMÁTICAS",
            Subject::LecturaCritica => "LECTURA CRÍTICA",
            Subject::Sociales => "SOCIALES Y CIUDADANAS",
            Subject::CienciasNaturales => "CIENCIAS NATURALES",
            Subject::Ingles => "INGLÉS",
        }
    }

    /// Accent-free prefixes accepted by the header scan fallback.
    /// Longer alternatives come first so the regex prefers them.
    pub fn header_prefixes(self) -> &'static [&'static str] {
        match self {
            Subject::Matematicas => &["MATEMATICAS"],
            Subject::LecturaCritica => &["LECTURA CRITICA"],
            Subject::Sociales => &["SOCIALES Y CIUDADANAS", "SOCIALES"],
            Subject::CienciasNaturales => &["CIENCIAS NATURALES"],
            Subject::Ingles => &["INGLES"],
        }
    }

    /// Weight in the global score. English counts once, the rest three times.
    pub fn weight(self) -> u32 {
        match self {
            Subject::Ingles => 1,
            _ => 3,
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
