//! Error types for BLOB handling

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BlobError>;

#[derive(Debug, Error)]
pub enum BlobError {
    #[error(transparent)]
    Binding(#[from] hrecord_binding::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Blob channel error: {0}")]
    Channel(String),

    #[error("Blob content is not available locally: {0}")]
    ContentUnavailable(String),

    #[error("Blob hash mismatch: expected {expected}, computed {actual}")]
    HashMismatch { expected: String, actual: String },

    #[error("Unsupported hash algorithm: {0}")]
    UnsupportedAlgorithm(String),
}
