//! Authentication configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Minimum secret length accepted in production.
const MIN_PRODUCTION_SECRET_LEN: usize = 16;

/// Token signing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret for access tokens
    pub jwt_secret: String,

    /// HMAC secret for refresh tokens
    pub refresh_secret: String,

    /// Access token lifetime in seconds
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_secs: i64,

    /// Refresh token lifetime in seconds
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_secs: i64,
}

impl AuthConfig {
    /// Validate authentication configuration
    ///
    /// In production, requires both secrets to be long enough.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.jwt_secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if self.refresh_secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__REFRESH_SECRET"));
        }
        if self.jwt_secret == self.refresh_secret {
            return Err(ValidationError::SecretsNotDistinct);
        }
        if self.access_token_ttl_secs <= 0 || self.refresh_token_ttl_secs <= 0 {
            return Err(ValidationError::InvalidTokenLifetime);
        }

        if *environment == Environment::Production {
            if self.jwt_secret.len() < MIN_PRODUCTION_SECRET_LEN {
                return Err(ValidationError::SecretTooShort("AUTH__JWT_SECRET"));
            }
            if self.refresh_secret.len() < MIN_PRODUCTION_SECRET_LEN {
                return Err(ValidationError::SecretTooShort("AUTH__REFRESH_SECRET"));
            }
        }

        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            refresh_secret: String::new(),
            access_token_ttl_secs: default_access_ttl(),
            refresh_token_ttl_secs: default_refresh_ttl(),
        }
    }
}

fn default_access_ttl() -> i64 {
    4 * 60 * 60
}

fn default_refresh_ttl() -> i64 {
    7 * 24 * 60 * 60
}
