use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by the scoring engine on malformed input.
///
/// The engine fails fast on bad numeric or timestamp text rather than
/// silently defaulting to zero. Platform-level absence or upstream fetch
/// failure is not an error here; it is modeled as
/// [`crate::domain::entities::profile::PlatformDatum::Error`] and handled by
/// weight redistribution.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", content = "message")]
pub enum ScoringError {
    #[error("Not a valid count: {input}")]
    InvalidCount { input: String },

    #[error("Unrecognized date format: {input}")]
    UnrecognizedTimestamp { input: String },

    #[error("Unknown time unit: {unit}")]
    UnknownTimeUnit { unit: char },

    #[error("Unknown platform key: {key}")]
    UnknownPlatform { key: String },
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("Preprompt file not readable at {path}: {source}")]
    PrepromptUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Feedback request failed: {0}")]
    RequestFailed(String),

    #[error("Feedback response contained no text")]
    EmptyResponse,

    #[error("Prompt generation blocked: {0}")]
    Blocked(String),
}
