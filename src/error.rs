//! cleanpaste Error Types
//!
//! Centralized error handling for the shell. The normalizer core is total
//! and never produces an error; everything here belongs to the
//! OS-integration glue around it.

use thiserror::Error;

/// Central error type for cleanpaste
#[derive(Error, Debug)]
pub enum CleanError {
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Hotkey error: {0}")]
    Hotkey(String),

    #[error("Audio feedback error: {0}")]
    Audio(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IPC error: {0}")]
    Ipc(String),

    #[error("Lock poisoned: {0}")]
    Lock(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for cleanpaste operations
pub type CleanResult<T> = Result<T, CleanError>;

/// Helper to convert Mutex poison errors
impl<T> From<std::sync::PoisonError<T>> for CleanError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        CleanError::Lock(err.to_string())
    }
}
