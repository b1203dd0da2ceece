//! Error types for the webshell harness.

use serde_json::Value;
use thiserror::Error;

/// Main error type for harness operations.
#[derive(Error, Debug)]
pub enum HarnessError {
    /// Network request error (connect failure, timeout, broken body stream).
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// The remote service answered with an error payload.
    #[error("Remote error ({status}): {message}")]
    Remote {
        status: u16,
        message: String,
        payload: Value,
    },

    /// Logout attempted while no session is held.
    #[error("No active session")]
    NoActiveSession,

    /// Operation name not present in the operation table.
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// A session-requiring operation was skipped because login failed earlier.
    #[error("Skipped {0}: no session after login failure")]
    SessionUnavailable(String),

    /// Download body ended before the local file was complete.
    #[error("Incomplete transfer: received {received} of {expected} bytes")]
    IncompleteTransfer { expected: u64, received: u64 },

    /// Transfer cancelled by the progress callback.
    #[error("Transfer cancelled")]
    Cancelled,

    /// Invalid or unexpected response from server.
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// Local I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(String),
}

/// Coarse classification used when reporting failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network or timeout failure, no remote payload.
    Transport,
    /// Structured error returned by the remote service.
    Remote,
    /// Local misuse: unknown operation, missing session.
    ClientContract,
    /// Download stream ended before the local sink completed.
    IncompleteTransfer,
    /// Local I/O, decoding or configuration failure.
    Local,
}

impl HarnessError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            HarnessError::RequestError(_) => ErrorKind::Transport,
            HarnessError::Remote { .. } => ErrorKind::Remote,
            HarnessError::NoActiveSession
            | HarnessError::UnknownOperation(_)
            | HarnessError::SessionUnavailable(_) => ErrorKind::ClientContract,
            HarnessError::IncompleteTransfer { .. } | HarnessError::Cancelled => {
                ErrorKind::IncompleteTransfer
            }
            HarnessError::InvalidResponse(_)
            | HarnessError::Io(_)
            | HarnessError::Json(_)
            | HarnessError::Config(_) => ErrorKind::Local,
        }
    }

    /// Remote payload, if the service sent one.
    pub fn payload(&self) -> Option<&Value> {
        match self {
            HarnessError::Remote { payload, .. } => Some(payload),
            _ => None,
        }
    }

    /// Whether the request timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, HarnessError::RequestError(e) if e.is_timeout())
    }
}

/// Result type alias for harness operations.
pub type Result<T> = std::result::Result<T, HarnessError>;
