use thiserror::Error;

use crate::llm::LlmError;

/// Errors from processing one conversational turn.
#[derive(Debug, Error)]
pub enum TurnError {
    /// The upstream judgment could not be parsed into the expected shape.
    /// Surfaced to the user as a generic processing error; no retry.
    #[error("malformed judgment from inference service: {0}")]
    MalformedJudgment(String),

    #[error("inference call failed: {0}")]
    Llm(#[from] LlmError),

    /// A turn is already in flight for this session. Submissions are
    /// rejected, not queued.
    #[error("a turn is already in flight for this session")]
    TurnInProgress,

    #[error("inference service unavailable: no API credential configured")]
    Unavailable,
}

/// Errors from session repository operations (trait definitions live in
/// waypoint-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("session not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}
