use strand_types::Digest;

/// Errors from string store operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    /// The submitted input has the wrong type or shape.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A string with this digest is already stored.
    #[error("string already exists: {0}")]
    DuplicateEntry(Digest),

    /// No string with this digest is stored.
    #[error("string not found: {0}")]
    NotFound(Digest),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
