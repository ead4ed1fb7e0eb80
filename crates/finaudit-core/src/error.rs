//! Error types for the finaudit-core library.

use thiserror::Error;

/// Main error type for the finaudit library.
///
/// Only structural problems surface here: input that is not a collection of
/// invoice-shaped records, an unusable configuration, or an I/O failure while
/// loading one. Malformed data inside an invoice is not an error; the audit
/// records it as an issue or compliance flag and always completes.
#[derive(Error, Debug)]
pub enum AuditError {
    /// Input is not a collection of invoice-shaped records.
    #[error("invalid input: {0}")]
    Input(String),

    /// Configuration error (e.g. an unparsable GSTIN pattern).
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for the finaudit library.
pub type Result<T> = std::result::Result<T, AuditError>;
