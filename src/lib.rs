// src/lib.rs

pub mod config;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod sources;
pub mod state;
pub mod utils;

// Re-export specific items for convenience if needed
pub use engine::{ingest, score_subjects};
pub use routes::create_router;
