//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid listen address")]
    InvalidSocketAddr,

    #[error("Base path must start with '/' and contain no spaces")]
    InvalidBasePath,

    #[error("Invalid database URL format (expected sqlite:)")]
    InvalidDatabaseUrl,

    #[error("Pool size must be between 1 and 100")]
    InvalidPoolSize,

    #[error("Signing secret {0} is too short for production")]
    SecretTooShort(&'static str),

    #[error("Access and refresh secrets must differ")]
    SecretsNotDistinct,

    #[error("Token lifetime must be positive")]
    InvalidTokenLifetime,

    #[error("Telemost API base must be an http(s) URL")]
    InvalidTelemostUrl,

    #[error("Bitrix24 webhook must be an https URL in production")]
    WebhookMustBeHttps,

    #[error("Bootstrap admin entry must look like portal:user_id, got {0:?}")]
    InvalidBootstrapAdmin(String),

    #[error("Telemost call budget ({budget_ms}ms) must be shorter than the request timeout ({request_timeout_ms}ms)")]
    ProviderBudgetTooLong {
        budget_ms: u128,
        request_timeout_ms: u128,
    },
}
