// src/models/mod.rs

pub mod analytics;
pub mod answer_key;
pub mod report;
pub mod response;
pub mod student;
pub mod subject;

pub use subject::Subject;
