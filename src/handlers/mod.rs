// src/handlers/mod.rs

pub mod ingest;
pub mod report;
