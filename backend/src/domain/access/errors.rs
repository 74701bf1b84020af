//! Access-control errors.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Failures of session admission and grant management.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The user holds no grant on the portal and may not sign in.
    #[error("user has no access to this portal")]
    NoGrant,

    /// The grant behind a refresh token was removed.
    #[error("user permissions revoked")]
    Revoked,

    /// Grant management needs an admin of the same portal.
    #[error("only portal admins can manage permissions")]
    AdminRequired,

    /// No grant to remove.
    #[error("permission not found")]
    GrantNotFound,

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<DomainError> for AccessError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::GrantNotFound => AccessError::GrantNotFound,
            _ => AccessError::Storage(err.to_string()),
        }
    }
}
