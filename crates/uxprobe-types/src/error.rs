use thiserror::Error;

/// Errors related to agent operations.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("agent not found")]
    NotFound,

    #[error("slug '{0}' already exists")]
    SlugConflict(String),

    #[error("invalid agent name: {0}")]
    InvalidName(String),

    #[error("invalid agent status: '{0}'")]
    InvalidStatus(String),

    #[error("a test run is already in progress")]
    AlreadyRunning,

    #[error("no test run in progress")]
    NotRunning,

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors from wizard draft mutations.
///
/// Most wizard operations are total and silently no-op instead of erroring;
/// only positional access with a bad index reports a failure.
#[derive(Debug, Error)]
pub enum DraftError {
    #[error("index {index} out of bounds (len {len})")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Errors from repository operations (used by trait definitions in uxprobe-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("query error: {0}")]
    Query(String),
}
