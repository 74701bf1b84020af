//! Error bodies and the mapping from domain errors to HTTP responses.
//!
//! Every error leaves the service as `{ "error": <message>, "code": <CODE> }`.
//! Messages are generic per class; the underlying detail is only logged.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::access::AccessError;
use crate::domain::conference::ConferenceError;
use crate::ports::{PortalError, ProviderError};

/// Standard error response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
    /// Error code for programmatic handling.
    pub code: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }
}

/// API error type that converts conference errors to HTTP responses.
#[derive(Debug)]
pub struct ConferenceApiError(pub ConferenceError);

impl From<ConferenceError> for ConferenceApiError {
    fn from(err: ConferenceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ConferenceApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self.0 {
            ConferenceError::Validation(err) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_FAILED", err.to_string())
            }
            ConferenceError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                "CONFERENCE_NOT_FOUND",
                "Conference not found".to_string(),
            ),
            ConferenceError::Conflict(_) => (
                StatusCode::CONFLICT,
                "DUPLICATE_LINK",
                "Conference link already exists".to_string(),
            ),
            ConferenceError::Provider(err) => {
                let (status, code, message) = provider_status(err);
                (status, code, message.to_string())
            }
            ConferenceError::Storage(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Internal server error".to_string(),
            ),
        };

        if status.is_server_error() {
            tracing::error!(code, error = %self.0, "Conference request failed");
        } else {
            tracing::debug!(code, error = %self.0, "Conference request rejected");
        }

        (status, Json(ErrorResponse::new(message, code))).into_response()
    }
}

fn provider_status(err: &ProviderError) -> (StatusCode, &'static str, &'static str) {
    match err {
        ProviderError::RateLimited { .. } => (
            StatusCode::TOO_MANY_REQUESTS,
            "PROVIDER_RATE_LIMITED",
            "Conference provider rate limit reached, try again later",
        ),
        ProviderError::InvalidRequest(_) => (
            StatusCode::BAD_REQUEST,
            "PROVIDER_REJECTED",
            "Conference provider rejected the request",
        ),
        ProviderError::Unauthorized => (
            StatusCode::BAD_GATEWAY,
            "PROVIDER_UNAUTHORIZED",
            "Conference provider refused our credentials",
        ),
        ProviderError::Unavailable { .. } | ProviderError::NotFound | ProviderError::Unsupported => (
            StatusCode::BAD_GATEWAY,
            "PROVIDER_UNAVAILABLE",
            "Conference provider is unavailable",
        ),
    }
}

/// API error type for the portal pass-through endpoints.
#[derive(Debug)]
pub struct PortalApiError(pub PortalError);

impl From<PortalError> for PortalApiError {
    fn from(err: PortalError) -> Self {
        Self(err)
    }
}

impl IntoResponse for PortalApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self.0 {
            PortalError::NotConfigured => (
                StatusCode::SERVICE_UNAVAILABLE,
                "PORTAL_NOT_CONFIGURED",
                "Portal access is not configured",
            ),
            PortalError::Upstream(detail) => {
                tracing::error!(detail = %detail, "Portal request failed");
                (StatusCode::BAD_GATEWAY, "PORTAL_ERROR", "Portal request failed")
            }
        };

        (status, Json(ErrorResponse::new(message, code))).into_response()
    }
}

/// API error type for session admission and grant management.
#[derive(Debug)]
pub struct AccessApiError(pub AccessError);

impl From<AccessError> for AccessApiError {
    fn from(err: AccessError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AccessApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self.0 {
            AccessError::Validation(err) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_FAILED", err.to_string())
            }
            AccessError::NoGrant => (
                StatusCode::FORBIDDEN,
                "NO_PERMISSION",
                "User does not have permissions".to_string(),
            ),
            AccessError::Revoked => (
                StatusCode::FORBIDDEN,
                "PERMISSION_REVOKED",
                "User permissions revoked".to_string(),
            ),
            AccessError::AdminRequired => (
                StatusCode::FORBIDDEN,
                "ADMIN_REQUIRED",
                "Only portal admins can manage permissions".to_string(),
            ),
            AccessError::GrantNotFound => (
                StatusCode::NOT_FOUND,
                "GRANT_NOT_FOUND",
                "Permission not found".to_string(),
            ),
            AccessError::Storage(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Internal server error".to_string(),
            ),
        };

        if status.is_server_error() {
            tracing::error!(code, error = %self.0, "Access request failed");
        } else {
            tracing::debug!(code, error = %self.0, "Access request rejected");
        }

        (status, Json(ErrorResponse::new(message, code))).into_response()
    }
}
