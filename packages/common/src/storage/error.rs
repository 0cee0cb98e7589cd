use thiserror::Error;

/// Failures while writing or removing uploaded files.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Empty name, or one that would leave the upload directory.
    #[error("invalid upload name: {0:?}")]
    InvalidName(String),

    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("upload exceeds size limit ({actual} > {limit} bytes)")]
    SizeLimitExceeded { actual: u64, limit: u64 },
}
