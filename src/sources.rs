// src/sources.rs

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::{
    error::IngestError,
    models::{Subject, answer_key::AnswerKeySet},
};

/// File name of the answer-key document inside the data directory.
pub const ANSWER_KEYS_FILE: &str = "answer_keys.json";

/// Where raw tables and answer keys come from.
///
/// Loading is the only async step of a run; scoring starts once every
/// load has returned.
#[async_trait]
pub trait SourceLoader: Send + Sync {
    /// Subjects this source is expected to provide.
    fn subjects(&self) -> Vec<Subject> {
        Subject::ALL.to_vec()
    }

    async fn load_answer_keys(&self) -> Result<AnswerKeySet, IngestError>;

    /// Raw CSV text of one subject's responses.
    async fn load_table(&self, subject: Subject) -> Result<String, IngestError>;
}

/// Reads `<dir>/answer_keys.json` and `<dir>/<subjectKey>.csv`.
#[derive(Debug, Clone)]
pub struct FsSource {
    data_dir: PathBuf,
}

impl FsSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn table_path(&self, subject: Subject) -> PathBuf {
        self.data_dir.join(format!("{}.csv", subject.key()))
    }
}

#[async_trait]
impl SourceLoader for FsSource {
    async fn load_answer_keys(&self) -> Result<AnswerKeySet, IngestError> {
        let path = self.data_dir.join(ANSWER_KEYS_FILE);
        let raw = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| IngestError::AnswerKeys(format!("{}: {}", path.display(), e)))?;

        serde_json::from_str(&raw)
            .map_err(|e| IngestError::AnswerKeys(format!("{}: {}", path.display(), e)))
    }

    async fn load_table(&self, subject: Subject) -> Result<String, IngestError> {
        let path = self.table_path(subject);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| IngestError::MissingSource {
                subject,
                reason: format!("{}: {}", path.display(), e),
            })
    }
}

/// Tables and keys supplied directly, e.g. in a request body.
#[derive(Debug, Clone, Default)]
pub struct InlineSource {
    answer_keys: AnswerKeySet,
    tables: BTreeMap<Subject, String>,
}

impl InlineSource {
    pub fn new(answer_keys: AnswerKeySet, tables: BTreeMap<Subject, String>) -> Self {
        Self {
            answer_keys,
            tables,
        }
    }
}

#[async_trait]
impl SourceLoader for InlineSource {
    /// Only the subjects that were actually supplied.
    fn subjects(&self) -> Vec<Subject> {
        self.tables.keys().copied().collect()
    }

    async fn load_answer_keys(&self) -> Result<AnswerKeySet, IngestError> {
        Ok(self.answer_keys.clone())
    }

    async fn load_table(&self, subject: Subject) -> Result<String, IngestError> {
        self.tables
            .get(&subject)
            .cloned()
            .ok_or_else(|| IngestError::MissingSource {
                subject,
                reason: "not supplied".to_string(),
            })
    }
}
