use thiserror::Error;

use crate::store::StoreError;

/// Error type for token issuance.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token lifetime must be positive")]
    InvalidTtl,
}

/// Reason a presented token was not accepted.
///
/// Only for audit logging; callers outside the gate see a single
/// `Unauthorized` outcome.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum TokenRejection {
    #[error("malformed token")]
    MalformedToken,

    #[error("invalid signature")]
    InvalidSignature,

    #[error("token expired")]
    Expired,

    #[error("unknown subject")]
    UnknownSubject,
}

/// Failure of full token validation, including subject re-resolution.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Token rejected: {0}")]
    Rejected(#[from] TokenRejection),

    #[error("Subject lookup failed: {0}")]
    Store(#[from] StoreError),
}
