//! Conference-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | Validation | 400 |
//! | NotFound | 404 |
//! | Conflict | 409 |
//! | Provider | 400 / 429 / 502 (by provider class) |
//! | Storage | 500 |
//!
//! The HTTP adapter owns the mapping; see `adapters::http::error`.

use crate::domain::foundation::{ConferenceId, DomainError, ErrorCode, ValidationError};
use crate::ports::ProviderError;

/// Errors produced by conference operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConferenceError {
    /// Request input failed validation before any component call.
    Validation(ValidationError),

    /// No conference with this id is owned by the caller.
    NotFound(ConferenceId),

    /// The provider link is already stored on another record.
    Conflict(String),

    /// The conferencing provider refused or failed the call.
    Provider(ProviderError),

    /// The local store failed.
    Storage(String),
}

impl ConferenceError {
    pub fn not_found(id: ConferenceId) -> Self {
        ConferenceError::NotFound(id)
    }

    pub fn storage(message: impl Into<String>) -> Self {
        ConferenceError::Storage(message.into())
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            ConferenceError::Validation(err) => err.to_string(),
            ConferenceError::NotFound(id) => format!("Conference not found: {}", id),
            ConferenceError::Conflict(_) => "Conference link already exists".to_string(),
            ConferenceError::Provider(err) => format!("Conference provider error: {}", err),
            ConferenceError::Storage(msg) => format!("Storage error: {}", msg),
        }
    }
}

impl std::fmt::Display for ConferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ConferenceError {}

impl From<ValidationError> for ConferenceError {
    fn from(err: ValidationError) -> Self {
        ConferenceError::Validation(err)
    }
}

impl From<ProviderError> for ConferenceError {
    fn from(err: ProviderError) -> Self {
        ConferenceError::Provider(err)
    }
}

impl From<DomainError> for ConferenceError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ConferenceNotFound => {
                let id = err
                    .details
                    .get("conference_id")
                    .and_then(|raw| raw.parse::<i64>().ok())
                    .unwrap_or_default();
                ConferenceError::NotFound(ConferenceId::from_i64(id))
            }
            ErrorCode::DuplicateLink => ConferenceError::Conflict(err.message),
            ErrorCode::ValidationFailed => ConferenceError::Validation(
                ValidationError::invalid_format("request", err.message),
            ),
            _ => ConferenceError::Storage(err.to_string()),
        }
    }
}
