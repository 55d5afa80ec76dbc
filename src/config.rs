// src/config.rs

use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding `answer_keys.json` and one `<subjectKey>.csv` per subject.
    pub data_dir: PathBuf,
    pub bind_addr: String,
    pub rust_log: String,
    pub log_dir: String,

    /// Name stamped on every report (`metadata.testName`).
    pub test_name: String,

    /// When set, every published report is also written here as JSON.
    pub output_path: Option<PathBuf>,

    pub ingest_on_startup: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());

        let test_name = env::var("TEST_NAME").unwrap_or_else(|_| "Simulacro".to_string());

        let output_path = env::var("OUTPUT_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let ingest_on_startup = env::var("INGEST_ON_STARTUP")
            .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no"))
            .unwrap_or(true);

        Self {
            data_dir,
            bind_addr,
            rust_log,
            log_dir,
            test_name,
            output_path,
            ingest_on_startup,
        }
    }
}
