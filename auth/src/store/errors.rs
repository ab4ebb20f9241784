use thiserror::Error;

/// Error type for credential store operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Username already exists: {0}")]
    UsernameTaken(String),

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Credential store unavailable: {0}")]
    Unavailable(String),
}
