// Error types for the hubdeck application.
// Covers cache preconditions, external command failures, and storage I/O.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HubdeckError {
    #[error("`owner` must be provided")]
    MissingOwner,

    #[error("command exited with status {code} (see {})", log.display())]
    CommandFailed { code: i32, log: PathBuf },

    #[error("cache storage error: {0}")]
    Storage(#[source] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, HubdeckError>;
