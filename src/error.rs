// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use crate::models::Subject;

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error
    InternalServerError(String),

    // 400 Bad Request
    BadRequest(String),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict (e.g., an ingestion run is already in progress)
    Conflict(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Implements `IntoResponse` for `AppError`.
/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        };
        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// A run that produced nothing, or whose answer keys are unusable, is the
/// caller's input problem. Anything else reaching the boundary is internal.
impl From<IngestError> for AppError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::AnswerKeys(_) | IngestError::NoUsableInput => {
                AppError::BadRequest(err.to_string())
            }
            other => AppError::InternalServerError(other.to_string()),
        }
    }
}

/// Problems met while ingesting response tables.
///
/// Only `AnswerKeys` and `NoUsableInput` fail a run. The per-subject variants
/// skip or degrade one subject and end up as warnings in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestError {
    /// The subject's raw table could not be loaded.
    MissingSource { subject: Subject, reason: String },

    /// The table was loaded but could not be decoded.
    MalformedTable { subject: Subject, reason: String },

    MissingIdentityColumn { subject: Subject },

    NoQuestionColumns { subject: Subject },

    /// Every row was dropped for lacking a usable respondent ID.
    NoRespondents { subject: Subject },

    /// No answer-key label matched any column; questions are unscored.
    MissingAnswerKey { subject: Subject, unscored: usize },

    /// An official answer outside `A`..`D`.
    InvalidKeyValue {
        subject: Subject,
        label: String,
        value: String,
    },

    /// The answer-key document is missing or malformed.
    AnswerKeys(String),

    /// No subject produced any results.
    NoUsableInput,
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestError::MissingSource { subject, reason } => {
                write!(f, "{subject}: source table unavailable ({reason})")
            }
            IngestError::MalformedTable { subject, reason } => {
                write!(f, "{subject}: malformed table ({reason})")
            }
            IngestError::MissingIdentityColumn { subject } => {
                write!(f, "{subject}: no respondent ID column found")
            }
            IngestError::NoQuestionColumns { subject } => {
                write!(f, "{subject}: no question columns found")
            }
            IngestError::NoRespondents { subject } => {
                write!(f, "{subject}: no rows with a usable respondent ID")
            }
            IngestError::MissingAnswerKey { subject, unscored } => write!(
                f,
                "{subject}: answer key matched no column, {unscored} questions are unscored"
            ),
            IngestError::InvalidKeyValue {
                subject,
                label,
                value,
            } => write!(f, "{subject}: answer key '{label}' has invalid option '{value}'"),
            IngestError::AnswerKeys(reason) => write!(f, "answer keys unusable: {reason}"),
            IngestError::NoUsableInput => write!(f, "no subject produced any results"),
        }
    }
}

impl std::error::Error for IngestError {}
